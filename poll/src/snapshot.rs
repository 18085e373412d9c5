//! Poll state persistence.
//!
//! A poll's custody, ballots, commitments and event log serialise to a
//! bincode snapshot. The asset collaborator is not part of the snapshot and
//! must be supplied again on restore.

use crate::asset::GovernanceAsset;
use crate::commit_reveal::CommitRevealEngine;
use crate::config::PollConfig;
use crate::controller::PollController;
use crate::custody::WeightCustody;
use crate::error::PollError;
use crate::events::EventLog;
use crate::ledger::BallotLedger;
use crate::params::DomainParams;
use crate::phase::PollPhase;
use serde::{Deserialize, Serialize};
use stakepoll_types::{TokenAmount, VoterAddress};
use std::sync::Arc;

/// Serializable image of a poll's in-memory state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSnapshot {
    pub config: PollConfig,
    pub phase: PollPhase,
    pub domain: Option<DomainParams>,
    pub custody: WeightCustody,
    pub ledger: BallotLedger,
    pub commit_reveal: Option<CommitRevealEngine>,
    pub events: EventLog,
    pub result: Option<i128>,
}

impl PollSnapshot {
    /// Reject images that no sequence of controller calls could produce.
    fn validate(&self) -> Result<(), PollError> {
        self.config.validate()?;
        if self.config.secure != self.commit_reveal.is_some() {
            return Err(PollError::Snapshot(
                "commit-reveal state does not match the secure flag".into(),
            ));
        }
        if (self.phase == PollPhase::Created) != self.domain.is_none() {
            return Err(PollError::Snapshot("domain does not match phase".into()));
        }
        if let Some(domain) = &self.domain {
            self.config.strategy.validate_domain(domain)?;
        }
        let phase_fits_variant = match self.phase {
            PollPhase::Created | PollPhase::Ended => true,
            PollPhase::Active => !self.config.secure,
            PollPhase::CommitOpen | PollPhase::RevealOpen => self.config.secure,
        };
        if !phase_fits_variant {
            return Err(PollError::Snapshot(format!(
                "phase {} is not reachable for this poll variant",
                self.phase
            )));
        }
        if (self.phase == PollPhase::Ended) != self.result.is_some() {
            return Err(PollError::Snapshot("result does not match phase".into()));
        }
        self.custody.check_consistent().map_err(PollError::Snapshot)?;
        self.validate_ballots()
    }

    fn validate_ballots(&self) -> Result<(), PollError> {
        // Ballots are only recorded once voting or revealing is open.
        let before_ballots = matches!(self.phase, PollPhase::Created | PollPhase::CommitOpen);
        if before_ballots && !self.ledger.is_empty() {
            return Err(PollError::Snapshot(format!(
                "ballots recorded in phase {}",
                self.phase
            )));
        }
        if let Some(engine) = &self.commit_reveal {
            if engine.policy() != self.config.mismatch_policy {
                return Err(PollError::Snapshot(
                    "mismatch policy does not match configuration".into(),
                ));
            }
            if self.phase == PollPhase::Created && engine.commitment_count() > 0 {
                return Err(PollError::Snapshot("commitments before start".into()));
            }
            if engine.revealed_count() != self.ledger.len() {
                return Err(PollError::Snapshot(
                    "ballots do not match revealed commitments".into(),
                ));
            }
        }

        // Release happens only after the end, so until then every weight is
        // still covered by its voter's lock.
        if self.phase == PollPhase::Ended {
            return Ok(());
        }
        let uncovered = |voter: &VoterAddress, weight: TokenAmount| {
            (weight > self.custody.locked_amount(voter)).then(|| {
                PollError::Snapshot(format!(
                    "weight {weight} of {voter} exceeds its locked amount"
                ))
            })
        };
        for (voter, record) in self.ledger.iter() {
            if let Some(err) = uncovered(voter, record.weight) {
                return Err(err);
            }
        }
        if let Some(engine) = &self.commit_reveal {
            for (voter, record) in engine.iter() {
                if let Some(err) = uncovered(voter, record.weight) {
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}

impl PollController {
    pub fn snapshot(&self) -> PollSnapshot {
        PollSnapshot {
            config: self.config.clone(),
            phase: self.phase,
            domain: self.domain,
            custody: self.custody.clone(),
            ledger: self.ledger.clone(),
            commit_reveal: self.commit_reveal.clone(),
            events: self.events.clone(),
            result: self.result,
        }
    }

    /// Serialize the poll state to bytes.
    pub fn save_state(&self) -> Result<Vec<u8>, PollError> {
        bincode::serialize(&self.snapshot()).map_err(|e| PollError::Snapshot(e.to_string()))
    }

    /// Rebuild a controller from a snapshot and the asset it was running against.
    pub fn from_snapshot(
        snapshot: PollSnapshot,
        asset: Arc<dyn GovernanceAsset>,
    ) -> Result<Self, PollError> {
        snapshot.validate()?;
        Ok(Self {
            config: snapshot.config,
            asset,
            phase: snapshot.phase,
            domain: snapshot.domain,
            custody: snapshot.custody,
            ledger: snapshot.ledger,
            commit_reveal: snapshot.commit_reveal,
            events: snapshot.events,
            result: snapshot.result,
        })
    }

    /// Restore a poll from bytes produced by [`PollController::save_state`].
    pub fn load_state(data: &[u8], asset: Arc<dyn GovernanceAsset>) -> Result<Self, PollError> {
        let snapshot: PollSnapshot =
            bincode::deserialize(data).map_err(|e| PollError::Snapshot(e.to_string()))?;
        Self::from_snapshot(snapshot, asset)
    }
}
