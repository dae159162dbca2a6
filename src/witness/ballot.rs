//! Per-ballot witness values: the voter's serial number, registered
//! credential, registry leaf, and the full assignment a single ballot
//! proof needs.

use num_bigint::BigUint;
use tracing::debug;

use crate::crypto::curve::AffinePoint;
use crate::crypto::elgamal::{ElectionBases, VoteEncoding};
use crate::crypto::field::FieldElement;
use crate::crypto::merkle::MerklePath;
use crate::crypto::mimc7;
use crate::error::CryptoError;

/// Serial number of a ballot, `hash(Sx, Tx, sk, e)`. Publishing it lets the
/// tally reject a second ballot from the same voter in the same election
/// without learning who voted.
pub fn serial_number(
    s: &AffinePoint,
    t: &AffinePoint,
    sk: &FieldElement,
    election_id: &FieldElement,
) -> FieldElement {
    mimc7::hash(&[
        s.x.clone(),
        t.x.clone(),
        sk.clone(),
        election_id.clone(),
    ])
}

/// The voter's registered credential, `hash(sk)`.
pub fn credential(sk: &FieldElement) -> FieldElement {
    mimc7::hash(std::slice::from_ref(sk))
}

/// The components of a voter's leaf in the registry tree.
pub fn registry_leaf(
    s: &AffinePoint,
    t: &AffinePoint,
    credential: &FieldElement,
) -> [FieldElement; 3] {
    [s.x.clone(), t.x.clone(), credential.clone()]
}

/// The derived values of one ballot: everything the circuit checks against
/// its public inputs.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BallotWitness {
    pub encoding: VoteEncoding,
    pub serial_number: FieldElement,
    pub credential: FieldElement,
    pub root: FieldElement,
}

/// Computes the full witness for one ballot from the secret inputs.
pub fn build_ballot(
    bases: &ElectionBases,
    election_id: &FieldElement,
    sk: &FieldElement,
    msg: &BigUint,
    randomizer: &BigUint,
    path: &MerklePath,
) -> Result<BallotWitness, CryptoError> {
    let encoding = VoteEncoding::encode(bases, msg, randomizer)?;
    let credential = credential(sk);
    let serial_number = serial_number(&bases.s, &bases.t, sk, election_id);
    let root = path.compute_root(&registry_leaf(&bases.s, &bases.t, &credential))?;
    debug!(height = path.height(), "assembled ballot witness");
    Ok(BallotWitness {
        encoding,
        serial_number,
        credential,
        root,
    })
}
