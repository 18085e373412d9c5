//! Voter address type.

use crate::StakepollError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An account on the governance asset, used as the lookup key for custody and ballots.
///
/// Addresses are 1..=64 ASCII characters drawn from `[A-Za-z0-9_.-]`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoterAddress(String);

impl VoterAddress {
    pub const MAX_LEN: usize = 64;

    /// Create a new voter address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed address. Use [`VoterAddress::parse`]
    /// for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(Self::is_well_formed(&s), "malformed voter address: {s:?}");
        Self(s)
    }

    /// Parse an address, rejecting malformed input.
    pub fn parse(raw: &str) -> Result<Self, StakepollError> {
        if Self::is_well_formed(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(StakepollError::InvalidAddress(raw.to_string()))
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        Self::is_well_formed(&self.0)
    }

    fn is_well_formed(s: &str) -> bool {
        !s.is_empty()
            && s.len() <= Self::MAX_LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
    }
}

impl fmt::Display for VoterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VoterAddress {
    type Error = StakepollError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if Self::is_well_formed(&raw) {
            Ok(Self(raw))
        } else {
            Err(StakepollError::InvalidAddress(raw))
        }
    }
}

impl From<VoterAddress> for String {
    fn from(addr: VoterAddress) -> Self {
        addr.0
    }
}

impl FromStr for VoterAddress {
    type Err = StakepollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
