//! Ballot values submitted by voters.

use crate::StakepollError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a voter submits: a scalar for range polls or a boolean signal for increment polls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ballot {
    /// A point on the poll's `[min, max]` range.
    Value(i64),
    /// Move the result up (`true`) or down (`false`) by one increment.
    Signal(bool),
}

impl Ballot {
    pub fn as_value(&self) -> Option<i64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Signal(_) => None,
        }
    }

    pub fn as_signal(&self) -> Option<bool> {
        match self {
            Self::Signal(s) => Some(*s),
            Self::Value(_) => None,
        }
    }

    /// Canonical byte encoding fed into commitment hashes.
    ///
    /// `0x00 ‖ i64 big-endian` for values, `0x01 ‖ 0x00|0x01` for signals.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Value(v) => {
                let mut out = Vec::with_capacity(9);
                out.push(0x00);
                out.extend_from_slice(&v.to_be_bytes());
                out
            }
            Self::Signal(s) => vec![0x01, u8::from(*s)],
        }
    }
}

impl fmt::Display for Ballot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Signal(s) => write!(f, "{s}"),
        }
    }
}

/// Parses `true`/`false` as signals and anything else as an integer value.
impl FromStr for Ballot {
    type Err = StakepollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "true" => Ok(Self::Signal(true)),
            "false" => Ok(Self::Signal(false)),
            other => other
                .parse::<i64>()
                .map(Self::Value)
                .map_err(|_| StakepollError::InvalidBallot(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodings_do_not_collide_across_kinds() {
        assert_ne!(Ballot::Value(1).encode(), Ballot::Signal(true).encode());
        assert_ne!(Ballot::Value(0).encode(), Ballot::Signal(false).encode());
    }

    #[test]
    fn parse_signals_and_values() {
        assert_eq!("true".parse::<Ballot>().unwrap(), Ballot::Signal(true));
        assert_eq!("-42".parse::<Ballot>().unwrap(), Ballot::Value(-42));
        assert!("maybe".parse::<Ballot>().is_err());
    }
}
