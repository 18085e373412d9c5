//! Cryptographic primitives for stakepoll.
//!
//! - **Blake2b-256** for hashing
//! - Domain-separated ballot commitments binding voter, ballot and salt
//! - OS-sourced random salts

pub mod commitment;
pub mod error;
pub mod hash;
pub mod salt;

pub use commitment::{compute_commitment, verify_commitment, COMMITMENT_DOMAIN};
pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi};
pub use salt::generate_salt;
