//! Append-only poll notification stream.

use crate::params::DomainParams;
use crate::phase::PollPhase;
use serde::{Deserialize, Serialize};
use stakepoll_types::{Ballot, CommitmentHash, Salt, TokenAmount, VoterAddress};

/// A notification published by a poll. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollEvent {
    Started {
        phase: PollPhase,
        domain: DomainParams,
    },
    Locked {
        voter: VoterAddress,
        amount: TokenAmount,
        locked: TokenAmount,
    },
    /// Plain ballot recorded (event-emitting polls only).
    Vote {
        voter: VoterAddress,
        ballot: Ballot,
        weight: TokenAmount,
    },
    Committed {
        voter: VoterAddress,
        commitment: CommitmentHash,
        weight: TokenAmount,
    },
    RevealOpened,
    /// Commitment opened successfully (event-emitting polls only).
    Reveal {
        voter: VoterAddress,
        ballot: Ballot,
        salt: Salt,
    },
    RevealRejected {
        voter: VoterAddress,
    },
    PollResult {
        result: i128,
    },
    Released {
        voter: VoterAddress,
        amount: TokenAmount,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<PollEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: PollEvent) {
        self.events.push(event);
    }

    pub fn as_slice(&self) -> &[PollEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Render every event as one JSON object per line.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lines_one_per_event() {
        let mut log = EventLog::new();
        log.push(PollEvent::RevealOpened);
        log.push(PollEvent::PollResult { result: 30 });
        let text = log.to_json_lines().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "\"reveal_opened\"");
        assert!(lines[1].contains("\"poll_result\""));
        assert!(lines[1].contains("30"));
    }
}
