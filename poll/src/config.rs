//! Poll construction parameters.

use crate::aggregation::AggregationStrategy;
use crate::commit_reveal::MismatchPolicy;
use crate::error::PollError;
use serde::{Deserialize, Serialize};
use stakepoll_types::VoterAddress;

/// Everything fixed when a poll is constructed.
///
/// Loaded from the `[poll]` table of a scenario file or built in code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Tally rule.
    pub strategy: AggregationStrategy,

    /// Hide ballots behind commit-reveal.
    #[serde(default)]
    pub secure: bool,

    /// Publish `Vote`/`Reveal` events carrying ballot contents.
    #[serde(default)]
    pub emit_ballot_events: bool,

    /// How secure polls treat a reveal that does not match its commitment.
    #[serde(default)]
    pub mismatch_policy: MismatchPolicy,

    /// Asset account that holds escrowed weight.
    #[serde(default = "default_escrow")]
    pub escrow: VoterAddress,
}

fn default_escrow() -> VoterAddress {
    VoterAddress::new("poll_escrow")
}

impl PollConfig {
    pub fn new(strategy: AggregationStrategy) -> Self {
        Self {
            strategy,
            secure: false,
            emit_ballot_events: false,
            mismatch_policy: MismatchPolicy::default(),
            escrow: default_escrow(),
        }
    }

    pub fn mean() -> Self {
        Self::new(AggregationStrategy::Mean)
    }

    pub fn median() -> Self {
        Self::new(AggregationStrategy::Median)
    }

    pub fn clustered_mean(width: u64) -> Self {
        Self::new(AggregationStrategy::ClusteredMean { width })
    }

    pub fn increment() -> Self {
        Self::new(AggregationStrategy::Increment)
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn with_events(mut self) -> Self {
        self.emit_ballot_events = true;
        self
    }

    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }

    pub fn with_escrow(mut self, escrow: VoterAddress) -> Self {
        self.escrow = escrow;
        self
    }

    pub fn validate(&self) -> Result<(), PollError> {
        self.strategy.validate()?;
        if !self.escrow.is_valid() {
            return Err(PollError::InvalidConfig(format!(
                "escrow address {:?} is malformed",
                self.escrow.as_str()
            )));
        }
        Ok(())
    }
}
