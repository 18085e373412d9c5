//! Scenario configuration with TOML file support.

use serde::Deserialize;
use stakepoll_poll::{DomainParams, PollConfig};
use stakepoll_types::{Ballot, VoterAddress};
use stakepoll_utils::LogFormat;
use std::path::Path;

use crate::SimError;

/// A complete simulation: logging, the poll under test, initial balances and
/// the calls to replay against it.
#[derive(Clone, Debug, Deserialize)]
pub struct SimConfig {
    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// The poll to construct.
    pub poll: PollConfig,

    /// Balances minted on the asset before the first step.
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,

    /// Calls replayed in order.
    #[serde(default)]
    pub steps: Vec<ScriptedStep>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AccountConfig {
    pub address: VoterAddress,
    pub balance: u64,
}

/// One scripted call, optionally expected to fail with a given error kind
/// (see `PollError::kind`).
#[derive(Clone, Debug, Deserialize)]
pub struct ScriptedStep {
    #[serde(flatten)]
    pub step: Step,
    #[serde(default)]
    pub expect_error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Start {
        domain: DomainParams,
    },
    Lock {
        voter: VoterAddress,
        amount: u64,
    },
    Vote {
        voter: VoterAddress,
        ballot: Ballot,
        weight: u64,
    },
    /// Compute the commitment off-chain from `ballot` and hex `salt`, then commit it.
    Commit {
        voter: VoterAddress,
        ballot: Ballot,
        salt: String,
        weight: u64,
    },
    OpenReveal,
    Reveal {
        voter: VoterAddress,
        ballot: Ballot,
        salt: String,
    },
    End,
    Release {
        voter: VoterAddress,
    },
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Lock { .. } => "lock",
            Self::Vote { .. } => "vote",
            Self::Commit { .. } => "commit",
            Self::OpenReveal => "open_reveal",
            Self::Reveal { .. } => "reveal",
            Self::End => "end",
            Self::Release { .. } => "release",
        }
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SimConfig {
    /// Load a scenario from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, SimError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse a scenario from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SimError> {
        let config: Self = toml::from_str(s).map_err(|e| SimError::Config(e.to_string()))?;
        config.poll.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakepoll_poll::{AggregationStrategy, MismatchPolicy};

    #[test]
    fn parses_minimal_scenario() {
        let config = SimConfig::from_toml_str(
            r#"
            [poll]
            strategy = "median"
            "#,
        )
        .unwrap();
        assert_eq!(config.poll.strategy, AggregationStrategy::Median);
        assert!(!config.poll.secure);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
        assert!(config.steps.is_empty());
    }

    #[test]
    fn parses_steps_and_nested_enums() {
        let config = SimConfig::from_toml_str(
            r#"
            log_format = "json"

            [poll]
            strategy = { clustered_mean = { width = 10 } }
            secure = true
            mismatch_policy = "abort"

            [[accounts]]
            address = "wallet1"
            balance = 20000

            [[steps]]
            action = "start"
            domain = { range = { min = 0, max = 100 } }

            [[steps]]
            action = "commit"
            voter = "wallet1"
            ballot = { value = 29 }
            salt = "0101010101010101010101010101010101010101010101010101010101010101"
            weight = 50

            [[steps]]
            action = "open_reveal"

            [[steps]]
            action = "end"
            expect_error = "UndefinedAggregate"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.poll.strategy,
            AggregationStrategy::ClusteredMean { width: 10 }
        );
        assert_eq!(config.poll.mismatch_policy, MismatchPolicy::Abort);
        assert_eq!(config.accounts[0].balance, 20000);
        assert_eq!(config.steps.len(), 4);
        assert!(matches!(
            config.steps[0].step,
            Step::Start {
                domain: DomainParams::Range { min: 0, max: 100 }
            }
        ));
        assert_eq!(config.steps[2].step.action(), "open_reveal");
        assert_eq!(
            config.steps[3].expect_error.as_deref(),
            Some("UndefinedAggregate")
        );
    }

    #[test]
    fn invalid_poll_config_rejected() {
        let err = SimConfig::from_toml_str(
            r#"
            [poll]
            strategy = { clustered_mean = { width = 0 } }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::Poll(_)));
    }

    #[test]
    fn unknown_action_rejected() {
        let err = SimConfig::from_toml_str(
            r#"
            [poll]
            strategy = "mean"

            [[steps]]
            action = "delegate"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}
