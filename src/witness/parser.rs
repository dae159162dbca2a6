//! JSON exchange of ballot wire assignments.
//!
//! The circuit driver consumes assignments as decimal strings keyed by wire
//! name; this module converts between that form and the typed values of the
//! crypto layer, validating imported points against the curve equation.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::crypto::curve::AffinePoint;
use crate::crypto::elgamal::{ElectionBases, VoteEncoding};
use crate::crypto::field::FieldElement;
use crate::crypto::merkle::MerklePath;
use crate::error::CryptoError;
use crate::witness::ballot::{build_ballot, BallotWitness};

/// One ballot's complete wire assignment in transport form. Field names
/// follow the circuit's wire names.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BallotAssignment {
    pub gx: String,
    pub gy: String,
    pub ux: String,
    pub uy: String,
    pub vx: String,
    pub vy: String,
    pub wx: String,
    pub wy: String,
    pub e: String,
    pub pk: String,
    pub sn: String,
    pub root: String,
    pub sk: String,
    pub sx: String,
    pub sy: String,
    pub tx: String,
    pub ty: String,
    pub rand: String,
    pub msg: String,
    pub direction_selector: String,
    pub intermediate_hashes: Vec<String>,
}

/// The typed counterpart of a `BallotAssignment`.
#[derive(Clone, Debug)]
pub struct ParsedBallot {
    pub bases: ElectionBases,
    pub election_id: FieldElement,
    pub credential: FieldElement,
    pub serial_number: FieldElement,
    pub root: FieldElement,
    pub encoding: VoteEncoding,
    pub sk: FieldElement,
    pub msg: BigUint,
    pub randomizer: BigUint,
    pub path: MerklePath,
}

fn parse_biguint(name: &str, value: &str) -> Result<BigUint, CryptoError> {
    BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(|| {
        CryptoError::InvalidAssignment(format!("{name}: not a decimal integer: {value:?}"))
    })
}

fn parse_field(name: &str, value: &str) -> Result<FieldElement, CryptoError> {
    Ok(FieldElement::new(parse_biguint(name, value)?))
}

fn parse_point(name: &str, x: &str, y: &str) -> Result<AffinePoint, CryptoError> {
    let point = AffinePoint::new(parse_field(name, x)?, parse_field(name, y)?);
    point.ensure_on_curve()?;
    Ok(point)
}

impl BallotAssignment {
    /// Flattens the inputs and the derived witness into transport form.
    pub fn export(
        bases: &ElectionBases,
        election_id: &FieldElement,
        sk: &FieldElement,
        msg: &BigUint,
        randomizer: &BigUint,
        path: &MerklePath,
        witness: &BallotWitness,
    ) -> Self {
        Self {
            gx: bases.g.x.to_string(),
            gy: bases.g.y.to_string(),
            ux: bases.u.x.to_string(),
            uy: bases.u.y.to_string(),
            vx: witness.encoding.v.x.to_string(),
            vy: witness.encoding.v.y.to_string(),
            wx: witness.encoding.w.x.to_string(),
            wy: witness.encoding.w.y.to_string(),
            e: election_id.to_string(),
            pk: witness.credential.to_string(),
            sn: witness.serial_number.to_string(),
            root: witness.root.to_string(),
            sk: sk.to_string(),
            sx: bases.s.x.to_string(),
            sy: bases.s.y.to_string(),
            tx: bases.t.x.to_string(),
            ty: bases.t.y.to_string(),
            rand: randomizer.to_string(),
            msg: msg.to_string(),
            direction_selector: path.direction_selector.to_string(),
            intermediate_hashes: path.siblings.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Serializes to the JSON document the circuit driver reads.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    /// Converts back into typed values, validating every imported point.
    pub fn parse(&self) -> Result<ParsedBallot, CryptoError> {
        let bases = ElectionBases {
            g: parse_point("g", &self.gx, &self.gy)?,
            u: parse_point("u", &self.ux, &self.uy)?,
            s: parse_point("s", &self.sx, &self.sy)?,
            t: parse_point("t", &self.tx, &self.ty)?,
        };
        let encoding = VoteEncoding {
            v: parse_point("v", &self.vx, &self.vy)?,
            w: parse_point("w", &self.wx, &self.wy)?,
        };
        let siblings = self
            .intermediate_hashes
            .iter()
            .enumerate()
            .map(|(i, value)| parse_field(&format!("intermediate_hashes[{i}]"), value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ParsedBallot {
            bases,
            election_id: parse_field("e", &self.e)?,
            credential: parse_field("pk", &self.pk)?,
            serial_number: parse_field("sn", &self.sn)?,
            root: parse_field("root", &self.root)?,
            encoding,
            sk: parse_field("sk", &self.sk)?,
            msg: parse_biguint("msg", &self.msg)?,
            randomizer: parse_biguint("rand", &self.rand)?,
            path: MerklePath::new(
                parse_biguint("direction_selector", &self.direction_selector)?,
                siblings,
            ),
        })
    }
}

impl ParsedBallot {
    /// Recomputes every derived wire from the secret inputs and compares it
    /// with the assigned value. A mismatch means the assignment was not
    /// produced by this engine's arithmetic.
    pub fn verify(&self) -> Result<bool, CryptoError> {
        let witness = build_ballot(
            &self.bases,
            &self.election_id,
            &self.sk,
            &self.msg,
            &self.randomizer,
            &self.path,
        )?;
        Ok(witness.encoding == self.encoding
            && witness.serial_number == self.serial_number
            && witness.credential == self.credential
            && witness.root == self.root)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;
    use crate::crypto::constants::GENERATOR;
    use crate::crypto::mimc7;

    fn fe(hex_str: &str) -> FieldElement {
        FieldElement::from_hex(hex_str).unwrap()
    }

    fn test_bases() -> ElectionBases {
        ElectionBases {
            g: GENERATOR.clone(),
            u: AffinePoint::new(
                fe("13641eca1827ad0acbee4f0ad1753b2f283b62a5e6f9dc68fb0bbc5af07f366b"),
                fe("0deda3e84e9efac8d6b69d3ca21609770da4c62b83526be735a798b4f4668f48"),
            ),
            s: AffinePoint::new(
                fe("2c373619821fed3d33f4e8af976c9ae38d3aec3672ee2ed4280ee87d6301658b"),
                fe("08f3d5be02e458e7a57eefe7a43e323bef542484c5cb94548d5519405a43e0b3"),
            ),
            t: AffinePoint::new(
                fe("23fbce96c9fd568b7232928af485745b2869683885e74087add2a6bc65b54e03"),
                fe("209725fd05b566b39b3aa586ba7d3f876dbbc8d7b3fbfed11f83cde775b0bc8e"),
            ),
        }
    }

    fn exported_assignment() -> BallotAssignment {
        let bases = test_bases();
        let election_id = FieldElement::from_u64(5);
        let sk = FieldElement::from_u64(0xabcdef);
        let msg = BigUint::from(1u32 << 16);
        let randomizer = BigUint::from(999_999u32);
        let siblings: Vec<FieldElement> = (1..=16)
            .map(|i| mimc7::hash(&[FieldElement::from_u64(i)]))
            .collect();
        let path = MerklePath::new(BigUint::from(0x73d5u32), siblings);

        let witness =
            build_ballot(&bases, &election_id, &sk, &msg, &randomizer, &path).unwrap();
        BallotAssignment::export(&bases, &election_id, &sk, &msg, &randomizer, &path, &witness)
    }

    #[test]
    fn json_round_trip_verifies() {
        let assignment = exported_assignment();
        let json = assignment.to_json().unwrap();
        let restored = BallotAssignment::from_json(&json).unwrap();
        let parsed = restored.parse().unwrap();
        assert!(parsed.verify().unwrap());
    }

    #[test]
    fn tampered_serial_number_fails_verification() {
        let mut assignment = exported_assignment();
        assignment.sn = FieldElement::from_u64(1).to_string();
        let parsed = assignment.parse().unwrap();
        assert!(!parsed.verify().unwrap());
    }

    #[test]
    fn off_curve_point_is_rejected() {
        let mut assignment = exported_assignment();
        assignment.vy = "1".to_string();
        assert!(matches!(
            assignment.parse(),
            Err(CryptoError::InvalidPoint { .. })
        ));
    }

    #[test]
    fn garbage_literal_is_rejected() {
        let mut assignment = exported_assignment();
        assignment.msg = "not-a-number".to_string();
        assert!(matches!(
            assignment.parse(),
            Err(CryptoError::InvalidAssignment(_))
        ));
    }
}
