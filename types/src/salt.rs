//! Voter-chosen salt blinding a committed ballot.

use crate::StakepollError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-byte secret salt. Revealed together with the ballot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Salt([u8; 32]);

impl Salt {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse from 64 hex characters, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, StakepollError> {
        crate::decode_hex_32(s).map(Self)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

// Salts stay secret until reveal; keep them out of debug logs.
impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt(..)")
    }
}

impl FromStr for Salt {
    type Err = StakepollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip_with_prefix() {
        let salt = Salt::new([0xAB; 32]);
        let parsed = Salt::from_hex(&format!("0x{}", salt.to_hex())).unwrap();
        assert_eq!(parsed, salt);
    }

    #[test]
    fn short_hex_rejected() {
        assert_eq!(
            Salt::from_hex("abcd"),
            Err(StakepollError::InvalidLength {
                expected: 64,
                actual: 4
            })
        );
    }

    #[test]
    fn debug_hides_bytes() {
        assert_eq!(format!("{:?}", Salt::new([7; 32])), "Salt(..)");
    }
}
