//! Fundamental types for stakepoll.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! voter addresses, token amounts, ballots, commitment hashes and salts.

pub mod address;
pub mod amount;
pub mod ballot;
pub mod error;
pub mod hash;
pub mod salt;

pub use address::VoterAddress;
pub use amount::TokenAmount;
pub use ballot::Ballot;
pub use error::StakepollError;
pub use hash::CommitmentHash;
pub use salt::Salt;

/// Decode a 32-byte value from 64 hex characters, with an optional `0x` prefix.
pub(crate) fn decode_hex_32(s: &str) -> Result<[u8; 32], StakepollError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.len() != 64 {
        return Err(StakepollError::InvalidLength {
            expected: 64,
            actual: s.len(),
        });
    }
    let mut out = [0u8; 32];
    hex::decode_to_slice(s, &mut out).map_err(|e| StakepollError::InvalidHex(e.to_string()))?;
    Ok(out)
}
