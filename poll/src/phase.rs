//! Poll lifecycle phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of a poll. Transitions only move forward.
///
/// Plain polls: `Created → Active → Ended`.
/// Secure polls: `Created → CommitOpen → RevealOpen → Ended`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PollPhase {
    /// Constructed; voters may lock weight but not vote.
    Created,
    /// Plain ballots are accepted.
    Active,
    /// Secure polls: hash commitments are accepted.
    CommitOpen,
    /// Secure polls: commitments are closed, reveals are accepted.
    RevealOpen,
    /// Result published; locked weight may be released.
    Ended,
}

impl PollPhase {
    /// Whether voters may still add locked weight.
    pub fn accepts_locks(&self) -> bool {
        matches!(self, Self::Created | Self::Active | Self::CommitOpen)
    }

    /// Whether `end_poll` may run from this phase.
    pub fn can_end(&self) -> bool {
        matches!(self, Self::Active | Self::RevealOpen)
    }
}

impl fmt::Display for PollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "Created",
            Self::Active => "Active",
            Self::CommitOpen => "CommitOpen",
            Self::RevealOpen => "RevealOpen",
            Self::Ended => "Ended",
        };
        f.write_str(name)
    }
}
