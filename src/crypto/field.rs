//! Arithmetic in the ALT-BN128 scalar field, plus the bit decomposition the
//! circuit side uses when it splits a wire into bits.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::crypto::constants::FIELD_PRIME;
use crate::error::CryptoError;

/// An element of the scalar field. The inner integer is always reduced into
/// `[0, P)`; no value outside that range is ever observable.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// Wraps an integer, reducing it modulo the field prime.
    pub fn new(value: BigUint) -> Self {
        Self(value % &*FIELD_PRIME)
    }

    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn one() -> Self {
        Self(BigUint::from(1u8))
    }

    pub fn from_u64(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }

    /// Parses a big-endian hex literal (even number of digits).
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| CryptoError::InvalidAssignment(format!("bad hex literal: {e}")))?;
        Ok(Self::new(BigUint::from_bytes_be(&bytes)))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn add(&self, rhs: &Self) -> Self {
        Self((&self.0 + &rhs.0) % &*FIELD_PRIME)
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        // both operands are reduced, so P + a - b never underflows
        Self((&*FIELD_PRIME + &self.0 - &rhs.0) % &*FIELD_PRIME)
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        Self((&self.0 * &rhs.0) % &*FIELD_PRIME)
    }

    /// Multiplicative inverse by Fermat exponentiation `a^(P-2)`.
    pub fn inverse(&self) -> Result<Self, CryptoError> {
        if self.0.is_zero() {
            return Err(CryptoError::DivisionByZero);
        }
        let exponent = &*FIELD_PRIME - BigUint::from(2u8);
        Ok(Self(self.0.modpow(&exponent, &FIELD_PRIME)))
    }

    pub fn div(&self, rhs: &Self) -> Result<Self, CryptoError> {
        Ok(self.mul(&rhs.inverse()?))
    }

    /// Bit decomposition of this element, least-significant bit first.
    pub fn to_bits(&self, width: usize) -> Result<Vec<u8>, CryptoError> {
        decompose_bits(&self.0, width)
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Splits `value` into exactly `width` bits, least-significant first.
///
/// This mirrors the circuit's byte-level wire export: full bytes are walked
/// from the least significant upward and the partial top byte, when the bit
/// length is not a byte multiple, contributes its remaining bits last. The
/// explicit full/remainder split keeps values whose big-endian form carries
/// a leading zero byte on the same code path as those that do not.
///
/// A value wider than `width` bits is rejected; truncation here would make
/// the witness disagree with the constraint side without any visible error.
pub fn decompose_bits(value: &BigUint, width: usize) -> Result<Vec<u8>, CryptoError> {
    let bit_len = value.bits() as usize;
    if bit_len > width {
        return Err(CryptoError::BitWidthOverflow {
            bits: bit_len,
            width,
        });
    }

    let mut out = vec![0u8; width];
    if bit_len == 0 {
        return Ok(out);
    }

    let bytes = value.to_bytes_be();
    let rem = bit_len % 8;
    // when rem != 0, bytes[0] is the partial top byte and is handled last
    let full_start = usize::from(rem != 0);

    let mut idx = 0;
    for byte in bytes[full_start..].iter().rev() {
        for i in 0..8 {
            out[idx] = (byte >> i) & 1;
            idx += 1;
        }
    }
    for i in 0..rem {
        out[idx] = (bytes[0] >> i) & 1;
        idx += 1;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use rand::Rng;

    use super::*;

    fn random_element() -> FieldElement {
        let mut rng = rand::thread_rng();
        let bytes: [u8; 32] = rng.gen();
        FieldElement::new(BigUint::from_bytes_be(&bytes))
    }

    fn recompose(bits: &[u8]) -> BigUint {
        bits.iter()
            .rev()
            .fold(BigUint::from(0u8), |acc, &b| (acc << 1) | BigUint::from(b))
    }

    #[test]
    fn add_sub_round_trip() {
        for _ in 0..20 {
            let a = random_element();
            let b = random_element();
            assert_eq!(a.add(&b).sub(&b), a);
        }
    }

    #[test]
    fn sub_wraps_below_zero() {
        let p_minus_one = FieldElement::new(&*FIELD_PRIME - BigUint::from(1u8));
        assert_eq!(FieldElement::zero().sub(&FieldElement::one()), p_minus_one);
    }

    #[test]
    fn mul_inverse_is_one() {
        for _ in 0..10 {
            let a = random_element();
            if a.is_zero() {
                continue;
            }
            assert_eq!(a.mul(&a.inverse().unwrap()), FieldElement::one());
        }
    }

    #[test]
    fn inverse_of_zero_is_rejected() {
        assert_eq!(
            FieldElement::zero().inverse(),
            Err(CryptoError::DivisionByZero)
        );
    }

    #[test]
    fn decompose_known_value() {
        // 0x73d5 = 0b111_0011_1101_0101
        let bits = decompose_bits(&BigUint::from(0x73d5u32), 16).unwrap();
        let expected = [1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 0];
        assert_eq!(bits, expected);
    }

    #[test]
    fn decompose_recomposes() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let len = rng.gen_range(0..32);
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let v = BigUint::from_bytes_be(&bytes);
            let bits = decompose_bits(&v, 254).unwrap();
            assert_eq!(recompose(&bits), v);
        }
    }

    #[test]
    fn decompose_exact_bit_length() {
        // bit length equals the requested width
        let v = BigUint::from(0b1010u8);
        assert_eq!(decompose_bits(&v, 4).unwrap(), vec![0, 1, 0, 1]);
    }

    #[test]
    fn decompose_byte_multiple_bit_length() {
        // 0x8000 has a 16-bit length, so its big-endian export carries a
        // leading zero byte on the circuit side
        let v = BigUint::from(0x8000u32);
        let bits = decompose_bits(&v, 16).unwrap();
        assert_eq!(recompose(&bits), v);
        assert_eq!(bits[15], 1);
        assert!(bits[..15].iter().all(|&b| b == 0));
    }

    #[test]
    fn decompose_zero() {
        assert_eq!(decompose_bits(&BigUint::from(0u8), 8).unwrap(), vec![0; 8]);
    }

    #[test]
    fn oversized_value_is_rejected() {
        let v = BigUint::from(0x10000u32);
        assert_eq!(
            decompose_bits(&v, 16),
            Err(CryptoError::BitWidthOverflow {
                bits: 17,
                width: 16
            })
        );
    }
}
