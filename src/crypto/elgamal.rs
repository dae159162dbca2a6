//! Homomorphic ballot encoding on the curve group.
//!
//! A ballot message is lifted into two related exponents so that adding the
//! encodings of many ballots point-wise yields the encoding of the message
//! sum. Recovering the sum from a combined encoding is the tally
//! authority's job and happens outside this crate.

use num_bigint::BigUint;
use rayon::prelude::*;

use crate::crypto::curve::AffinePoint;
use crate::error::CryptoError;

/// The four bases a ballot encoding is built on: the shared generator `G`,
/// the tally authority's public point `U`, and the per-election pair
/// `(S, T)` handed out at registration.
#[derive(Clone, Debug)]
pub struct ElectionBases {
    pub g: AffinePoint,
    pub u: AffinePoint,
    pub s: AffinePoint,
    pub t: AffinePoint,
}

/// One encoded ballot. The two components only carry meaning as a pair.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VoteEncoding {
    pub v: AffinePoint,
    pub w: AffinePoint,
}

impl VoteEncoding {
    /// `v = r*G + msg*S`, `w = r*U + msg*T`. The randomizer is supplied by
    /// the caller; this crate contains no randomness of its own.
    pub fn encode(
        bases: &ElectionBases,
        msg: &BigUint,
        randomizer: &BigUint,
    ) -> Result<Self, CryptoError> {
        let v = bases
            .g
            .scalar_mul(randomizer)?
            .add(&bases.s.scalar_mul(msg)?)?;
        let w = bases
            .u
            .scalar_mul(randomizer)?
            .add(&bases.t.scalar_mul(msg)?)?;
        Ok(Self { v, w })
    }

    /// Point-wise sum of two encodings.
    pub fn combine(&self, other: &Self) -> Result<Self, CryptoError> {
        Ok(Self {
            v: self.v.add(&other.v)?,
            w: self.w.add(&other.w)?,
        })
    }
}

/// Sums a batch of encodings. Point addition is associative and
/// commutative, so the reduction order does not matter and the work is
/// spread across threads.
///
/// # Panics
///
/// Panics on an empty slice.
pub fn combine_all(encodings: &[VoteEncoding]) -> Result<VoteEncoding, CryptoError> {
    assert!(
        !encodings.is_empty(),
        "combine_all requires at least one encoding"
    );
    encodings
        .par_iter()
        .map(|encoding| Ok::<VoteEncoding, CryptoError>(encoding.clone()))
        .try_reduce_with(|a, b| a.combine(&b))
        .expect("checked non-empty above")
}
