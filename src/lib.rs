//! Plain numeric engine for the anonymous-voting circuits.
//!
//! Everything the circuits compute inside the constraint system is computed
//! here a second time with ordinary big-integer arithmetic: field operations
//! modulo the ALT-BN128 scalar prime, MiMC7 hashing, scalar multiplication
//! on the embedded Montgomery curve, Merkle authentication paths, and the
//! homomorphic ballot encoding. Witness generation assigns these values to
//! the circuit wires, and verification drivers compare them against the
//! constraint-side outputs, so the two implementations have to agree
//! bit-for-bit.

pub mod crypto;
pub mod error;
pub mod witness;

pub use error::CryptoError;
