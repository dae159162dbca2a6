//! Group arithmetic on the Montgomery curve `y^2 = x^3 + A*x^2 + x`
//! embedded in the scalar field.
//!
//! Points are immutable values; every operation returns a new point. The
//! representation is affine only. There is no point at infinity: operations
//! whose result would be the identity (doubling a point of order two,
//! adding a point to its negation, multiplying by a scalar that reduces to
//! zero) fail with `DivisionByZero` instead.

use num_bigint::BigUint;

use crate::crypto::constants::{COEFF_A, EXPONENT_BITWIDTH, SUBGROUP_ORDER};
use crate::crypto::field::{decompose_bits, FieldElement};
use crate::error::CryptoError;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AffinePoint {
    pub x: FieldElement,
    pub y: FieldElement,
}

impl AffinePoint {
    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        Self { x, y }
    }

    pub fn is_on_curve(&self) -> bool {
        let y_sq = self.y.mul(&self.y);
        let x_sq = self.x.mul(&self.x);
        let x_cu = x_sq.mul(&self.x);
        y_sq == x_cu.add(&x_sq.mul(&COEFF_A)).add(&self.x)
    }

    /// Curve-equation check for validation paths (imported witness points).
    pub fn ensure_on_curve(&self) -> Result<(), CryptoError> {
        if self.is_on_curve() {
            Ok(())
        } else {
            Err(CryptoError::InvalidPoint {
                x: self.x.to_string(),
                y: self.y.to_string(),
            })
        }
    }

    pub fn negate(&self) -> Self {
        Self {
            x: self.x.clone(),
            y: FieldElement::zero().sub(&self.y),
        }
    }

    /// Tangent-line doubling. Fails when `y == 0` (a point of order two,
    /// which does not occur in the prime-order subgroup).
    pub fn double(&self) -> Result<Self, CryptoError> {
        let two = FieldElement::from_u64(2);
        let three = FieldElement::from_u64(3);
        let x_sq = self.x.mul(&self.x);
        let slope = three
            .mul(&x_sq)
            .add(&two.mul(&COEFF_A).mul(&self.x))
            .add(&FieldElement::one())
            .div(&two.mul(&self.y))?;
        let slope_sq = slope.mul(&slope);
        let x3 = slope_sq.sub(&COEFF_A).sub(&self.x).sub(&self.x);
        let y3 = three
            .mul(&self.x)
            .add(&COEFF_A)
            .sub(&slope_sq)
            .mul(&slope)
            .sub(&self.y);
        Ok(Self { x: x3, y: y3 })
    }

    /// Chord addition of two distinct points. Fails when the x coordinates
    /// coincide (equal points or a point and its negation).
    fn chord_add(&self, other: &Self) -> Result<Self, CryptoError> {
        let two = FieldElement::from_u64(2);
        let slope = self.y.sub(&other.y).div(&self.x.sub(&other.x))?;
        let slope_sq = slope.mul(&slope);
        let slope_cu = slope_sq.mul(&slope);
        let x3 = slope_sq.sub(&COEFF_A).sub(&self.x).sub(&other.x);
        let y3 = two
            .mul(&self.x)
            .add(&other.x)
            .add(&COEFF_A)
            .mul(&slope)
            .sub(&slope_cu)
            .sub(&self.y);
        Ok(Self { x: x3, y: y3 })
    }

    /// Point addition; equal operands are routed to `double`.
    pub fn add(&self, other: &Self) -> Result<Self, CryptoError> {
        if self == other {
            self.double()
        } else {
            self.chord_add(other)
        }
    }

    pub fn sub(&self, other: &Self) -> Result<Self, CryptoError> {
        self.chord_add(&other.negate())
    }

    /// Scalar multiplication with a fixed operation structure.
    ///
    /// The scalar is reduced modulo the subgroup order and decomposed into
    /// 254 bits. A table of successive doublings is folded from the top bit
    /// down, and each step keeps or discards the chord sum by arithmetic
    /// blending `r + bit * (candidate - r)` rather than a branch, so the
    /// same sequence of group operations runs for every bit pattern. The
    /// fold starts offset by one extra table entry, which is subtracted at
    /// the end; this keeps every intermediate chord addition well-defined
    /// and matches the constraint-side gadget, which cannot branch at all.
    pub fn scalar_mul(&self, scalar: &BigUint) -> Result<Self, CryptoError> {
        let reduced = scalar % &*SUBGROUP_ORDER;
        let bits = decompose_bits(&reduced, EXPONENT_BITWIDTH)?;

        let mut table = Vec::with_capacity(EXPONENT_BITWIDTH + 1);
        table.push(self.clone());
        for j in 1..=EXPONENT_BITWIDTH {
            let doubled = table[j - 1].double()?;
            table.push(doubled);
        }

        let mut result = table[EXPONENT_BITWIDTH].clone();
        for j in (0..EXPONENT_BITWIDTH).rev() {
            let candidate = result.chord_add(&table[j])?;
            let bit = FieldElement::from_u64(u64::from(bits[j]));
            let x = result.x.add(&bit.mul(&candidate.x.sub(&result.x)));
            let y = result.y.add(&bit.mul(&candidate.y.sub(&result.y)));
            result = Self { x, y };
        }
        result.sub(&table[EXPONENT_BITWIDTH])
    }
}
