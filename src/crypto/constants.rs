//! Protocol constants. These must match the constraint-side configuration
//! exactly; changing any of them invalidates every previously generated
//! witness and proof.

use lazy_static::lazy_static;
use num_bigint::BigUint;

use crate::crypto::curve::AffinePoint;
use crate::crypto::field::FieldElement;

/// Width of the bit decomposition a scalar multiplication consumes.
pub const EXPONENT_BITWIDTH: usize = 254;

/// Number of MiMC7 rounds.
pub const NUM_ROUNDS: usize = 91;

/// Seed string the round-constant derivation chain starts from.
pub const MIMC7_SEED: &str = "snplab_CRV_seed";

lazy_static! {
    /// The ALT-BN128 scalar field prime. Every wire value lives in `[0, P)`.
    pub static ref FIELD_PRIME: BigUint = BigUint::parse_bytes(
        b"21888242871839275222246405745257275088548364400416034343698204186575808495617",
        10,
    )
    .expect("field prime literal");

    /// Order of the prime-order subgroup scalars are reduced into before
    /// decomposition.
    pub static ref SUBGROUP_ORDER: BigUint = BigUint::parse_bytes(
        b"2736030358979909402780800718157159386074658810754251464600343418943805806723",
        10,
    )
    .expect("subgroup order literal");

    /// Montgomery coefficient of the embedded curve
    /// `y^2 = x^3 + A*x^2 + x`.
    pub static ref COEFF_A: FieldElement = FieldElement::from_u64(126932);

    /// Subgroup generator `G` shared by every election.
    pub static ref GENERATOR: AffinePoint = AffinePoint::new(
        FieldElement::from_hex("16fd271ae0ad87ddae03044ac6852ee1d2ac024d42cff099c50ea7510d2a70a5")
            .expect("generator x literal"),
        FieldElement::from_hex("291d2a8217f35195cb3f45acde062e1709c7fdc7b1fe623c0a27021ae5446310")
            .expect("generator y literal"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_on_curve() {
        assert!(GENERATOR.is_on_curve());
    }

    #[test]
    fn subgroup_order_fits_the_exponent_width() {
        assert!((SUBGROUP_ORDER.bits() as usize) <= EXPONENT_BITWIDTH);
    }
}
