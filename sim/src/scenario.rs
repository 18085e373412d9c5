//! Scenario runner — replays scripted calls against a poll backed by a
//! [`NullAsset`].

use crate::config::{ScriptedStep, SimConfig, Step};
use crate::SimError;
use stakepoll_crypto::compute_commitment;
use stakepoll_nullables::NullAsset;
use stakepoll_poll::{PollController, PollError, PollEvent, PollPhase, RevealOutcome};
use stakepoll_types::{Salt, TokenAmount};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioReport {
    pub steps_run: usize,
    /// Steps that failed with the error kind they declared.
    pub expected_failures: usize,
    pub phase: PollPhase,
    pub result: Option<i128>,
    pub events: Vec<PollEvent>,
}

pub struct Scenario {
    asset: Arc<NullAsset>,
    controller: PollController,
    steps: Vec<ScriptedStep>,
}

impl Scenario {
    /// Mint the configured balances and construct the poll.
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        let asset = Arc::new(NullAsset::new());
        for account in &config.accounts {
            asset.mint(&account.address, TokenAmount::from(u128::from(account.balance)));
        }
        let controller = PollController::new(config.poll.clone(), asset.clone())?;
        Ok(Self {
            asset,
            controller,
            steps: config.steps.clone(),
        })
    }

    pub fn controller(&self) -> &PollController {
        &self.controller
    }

    pub fn asset(&self) -> &NullAsset {
        &self.asset
    }

    /// Replay every step in order, stopping at the first step whose outcome
    /// differs from its expectation.
    pub fn run(&mut self) -> Result<ScenarioReport, SimError> {
        let steps = std::mem::take(&mut self.steps);
        let mut expected_failures = 0;

        for (index, scripted) in steps.iter().enumerate() {
            let action = scripted.step.action();
            let outcome = self.apply(&scripted.step);
            match (outcome, scripted.expect_error.as_deref()) {
                (Ok(()), None) => debug!(index, action, "step ok"),
                (Ok(()), Some(expected)) => {
                    return Err(SimError::UnexpectedSuccess {
                        index,
                        action,
                        expected: expected.to_string(),
                    })
                }
                (Err(err), Some(expected)) if err.kind() == expected => {
                    debug!(index, action, error = %err, "step failed as expected");
                    expected_failures += 1;
                }
                (Err(err), Some(expected)) => {
                    return Err(SimError::WrongError {
                        index,
                        action,
                        expected: expected.to_string(),
                        actual: err,
                    })
                }
                (Err(source), None) => {
                    return Err(SimError::StepFailed {
                        index,
                        action,
                        source,
                    })
                }
            }
        }

        let report = ScenarioReport {
            steps_run: steps.len(),
            expected_failures,
            phase: self.controller.phase(),
            result: self.controller.result(),
            events: self.controller.events().to_vec(),
        };
        info!(
            steps = report.steps_run,
            expected_failures,
            phase = %report.phase,
            "scenario finished"
        );
        Ok(report)
    }

    fn apply(&mut self, step: &Step) -> Result<(), PollError> {
        let poll = &mut self.controller;
        match step {
            Step::Start { domain } => poll.start_poll(*domain).map(drop),
            Step::Lock { voter, amount } => poll.lock(voter, amount_of(*amount)).map(drop),
            Step::Vote {
                voter,
                ballot,
                weight,
            } => poll.vote(voter, *ballot, amount_of(*weight)),
            Step::Commit {
                voter,
                ballot,
                salt,
                weight,
            } => {
                let salt = parse_salt(salt)?;
                poll.commit(voter, compute_commitment(voter, ballot, &salt), amount_of(*weight))
            }
            Step::OpenReveal => poll.open_reveal(),
            Step::Reveal {
                voter,
                ballot,
                salt,
            } => {
                let salt = parse_salt(salt)?;
                match poll.reveal(voter, *ballot, &salt)? {
                    RevealOutcome::Accepted(_) => Ok(()),
                    // Surfaced as the abort-policy error so scripts can expect
                    // `CommitMismatch` under either policy.
                    RevealOutcome::Mismatched => Err(PollError::CommitMismatch(voter.to_string())),
                }
            }
            Step::End => poll.end_poll().map(drop),
            Step::Release { voter } => poll.release(voter).map(drop),
        }
    }
}

fn amount_of(raw: u64) -> TokenAmount {
    TokenAmount::from(u128::from(raw))
}

fn parse_salt(hex: &str) -> Result<Salt, PollError> {
    Salt::from_hex(hex).map_err(|e| PollError::InvalidConfig(format!("salt: {e}")))
}

/// Parse and run a scenario in one go.
pub fn run_scenario(config: &SimConfig) -> Result<(Scenario, ScenarioReport), SimError> {
    let mut scenario = Scenario::new(config)?;
    let report = scenario.run()?;
    Ok((scenario, report))
}

/// Write the poll's events to `path` as JSON lines.
pub fn write_events(path: &Path, controller: &PollController) -> Result<(), SimError> {
    let text = controller
        .event_log()
        .to_json_lines()
        .map_err(|e| SimError::Export(e.to_string()))?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Write a bincode snapshot of the poll to `path`.
pub fn write_snapshot(path: &Path, controller: &PollController) -> Result<(), SimError> {
    let bytes = controller.save_state()?;
    std::fs::write(path, bytes)?;
    Ok(())
}
