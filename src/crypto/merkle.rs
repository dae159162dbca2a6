//! Merkle authentication-path recomputation over MiMC7.
//!
//! Nothing of the tree itself is stored here; a path is built per witness,
//! folded once into a root, and discarded.

use num_bigint::BigUint;

use crate::crypto::field::{decompose_bits, FieldElement};
use crate::crypto::mimc7;
use crate::error::CryptoError;

/// One inclusion path: a direction selector and the sibling hash per level.
/// The tree height is the number of siblings. Bit `i` of the selector
/// governs level `i`: a zero bit places the accumulated hash on the right
/// of the next compression, a one bit on the left.
#[derive(Clone, Debug)]
pub struct MerklePath {
    pub direction_selector: BigUint,
    pub siblings: Vec<FieldElement>,
}

impl MerklePath {
    pub fn new(direction_selector: BigUint, siblings: Vec<FieldElement>) -> Self {
        Self {
            direction_selector,
            siblings,
        }
    }

    pub fn height(&self) -> usize {
        self.siblings.len()
    }

    /// Hashes the leaf components and folds the path up to the root.
    ///
    /// A selector wider than the tree height is rejected; both the witness
    /// side and the constraint side consume the same selector, so they must
    /// agree on every bit of it.
    pub fn compute_root(
        &self,
        leaf_components: &[FieldElement],
    ) -> Result<FieldElement, CryptoError> {
        let direction_bits = decompose_bits(&self.direction_selector, self.height())?;
        let mut current = mimc7::hash(leaf_components);
        for (bit, sibling) in direction_bits.iter().zip(&self.siblings) {
            current = if *bit == 0 {
                mimc7::compress(sibling, &current)
            } else {
                mimc7::compress(&current, sibling)
            };
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;

    #[test]
    fn direction_bits_select_the_compression_order() {
        let leaf = FieldElement::from_u64(5);
        let siblings = vec![FieldElement::from_u64(10), FieldElement::from_u64(20)];
        // selector 0b10: level 0 keeps the accumulator right, level 1 left
        let path = MerklePath::new(BigUint::from(0b10u8), siblings.clone());
        let root = path.compute_root(std::slice::from_ref(&leaf)).unwrap();

        let level0 = mimc7::compress(&siblings[0], &mimc7::hash(std::slice::from_ref(&leaf)));
        let level1 = mimc7::compress(&level0, &siblings[1]);
        assert_eq!(root, level1);
    }

    #[test]
    fn oversized_selector_is_rejected() {
        let path = MerklePath::new(
            BigUint::from(0x10000u32),
            vec![FieldElement::zero(); 16],
        );
        assert_eq!(
            path.compute_root(&[FieldElement::one()]),
            Err(CryptoError::BitWidthOverflow {
                bits: 17,
                width: 16
            })
        );
    }

    #[test]
    fn root_is_deterministic() {
        let siblings: Vec<FieldElement> = (1..=8).map(FieldElement::from_u64).collect();
        let path = MerklePath::new(BigUint::from(0xa5u8), siblings);
        let leaf = [FieldElement::from_u64(42), FieldElement::from_u64(43)];
        assert_eq!(
            path.compute_root(&leaf).unwrap(),
            path.compute_root(&leaf).unwrap()
        );
    }
}
