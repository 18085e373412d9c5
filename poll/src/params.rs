//! Poll domain parameters, supplied at `start_poll`.

use serde::{Deserialize, Serialize};
use stakepoll_types::Ballot;
use std::fmt;

/// The set of ballots a poll accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainParams {
    /// Scalar ballots in `[min, max]` (mean, median and clustered-mean polls).
    Range { min: i64, max: i64 },
    /// Boolean ballots moving `start` by `increment` per unit of net weight.
    Increment { start: i64, increment: i64 },
}

impl DomainParams {
    pub fn range(min: i64, max: i64) -> Self {
        Self::Range { min, max }
    }

    pub fn increment(start: i64, increment: i64) -> Self {
        Self::Increment { start, increment }
    }

    /// Whether `ballot` is a valid ballot for this domain.
    pub fn contains(&self, ballot: &Ballot) -> bool {
        match (self, ballot) {
            (Self::Range { min, max }, Ballot::Value(v)) => min <= v && v <= max,
            (Self::Increment { .. }, Ballot::Signal(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for DomainParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { min, max } => write!(f, "[{min}, {max}]"),
            Self::Increment { start, increment } => {
                write!(f, "increment(start={start}, step={increment})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_inclusive() {
        let d = DomainParams::range(0, 100);
        assert!(d.contains(&Ballot::Value(0)));
        assert!(d.contains(&Ballot::Value(100)));
        assert!(!d.contains(&Ballot::Value(101)));
        assert!(!d.contains(&Ballot::Value(-1)));
    }

    #[test]
    fn kinds_do_not_mix() {
        assert!(!DomainParams::range(0, 1).contains(&Ballot::Signal(true)));
        assert!(!DomainParams::increment(500, 5).contains(&Ballot::Value(1)));
        assert!(DomainParams::increment(500, 5).contains(&Ballot::Signal(false)));
    }
}
