//! Poll controller — the phase state machine and public surface of a poll.
//!
//! The controller owns custody, the ballot ledger, the optional commit-reveal
//! engine and the event log. Every mutating call takes `&mut self`, checks
//! its phase guard first, validates everything else, and only then writes,
//! so a failed call leaves no partial state behind.

use crate::aggregation::WeightedBallot;
use crate::asset::GovernanceAsset;
use crate::commit_reveal::{CommitRevealEngine, CommitmentRecord, RevealOutcome};
use crate::config::PollConfig;
use crate::custody::WeightCustody;
use crate::error::PollError;
use crate::events::{EventLog, PollEvent};
use crate::ledger::{BallotLedger, BallotRecord};
use crate::params::DomainParams;
use crate::phase::PollPhase;
use stakepoll_types::{Ballot, CommitmentHash, Salt, TokenAmount, VoterAddress};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PollController {
    pub(crate) config: PollConfig,
    pub(crate) asset: Arc<dyn GovernanceAsset>,
    pub(crate) phase: PollPhase,
    pub(crate) domain: Option<DomainParams>,
    pub(crate) custody: WeightCustody,
    pub(crate) ledger: BallotLedger,
    pub(crate) commit_reveal: Option<CommitRevealEngine>,
    pub(crate) events: EventLog,
    pub(crate) result: Option<i128>,
}

impl PollController {
    /// Construct a poll in the `Created` phase.
    pub fn new(config: PollConfig, asset: Arc<dyn GovernanceAsset>) -> Result<Self, PollError> {
        config.validate()?;
        let commit_reveal = config
            .secure
            .then(|| CommitRevealEngine::new(config.mismatch_policy));
        Ok(Self {
            custody: WeightCustody::new(config.escrow.clone()),
            config,
            asset,
            phase: PollPhase::Created,
            domain: None,
            ledger: BallotLedger::new(),
            commit_reveal,
            events: EventLog::new(),
            result: None,
        })
    }

    fn require_phase(&self, operation: &'static str, phase: PollPhase) -> Result<(), PollError> {
        if self.phase != phase {
            return Err(PollError::WrongPhase {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn reject_escrow(&self, voter: &VoterAddress) -> Result<(), PollError> {
        if voter == self.custody.escrow() {
            return Err(PollError::EscrowCannotVote(voter.to_string()));
        }
        Ok(())
    }

    // The domain is always set once the poll has left `Created`.
    fn active_domain(&self, operation: &'static str) -> Result<DomainParams, PollError> {
        self.domain.ok_or(PollError::WrongPhase {
            operation,
            phase: self.phase,
        })
    }

    /// Fix the ballot domain and open voting (or commitments, for secure polls).
    pub fn start_poll(&mut self, domain: DomainParams) -> Result<PollPhase, PollError> {
        if self.phase != PollPhase::Created {
            return Err(PollError::AlreadyStarted);
        }
        self.config.strategy.validate_domain(&domain)?;

        let next = if self.config.secure {
            PollPhase::CommitOpen
        } else {
            PollPhase::Active
        };
        self.domain = Some(domain);
        self.phase = next;
        self.events.push(PollEvent::Started {
            phase: next,
            domain,
        });
        info!(
            strategy = self.config.strategy.name(),
            secure = self.config.secure,
            %domain,
            phase = %next,
            "poll started"
        );
        Ok(next)
    }

    /// Escrow `amount` of the governance asset from `voter` as voting weight.
    ///
    /// Returns the voter's locked total after the top-up.
    pub fn lock(
        &mut self,
        voter: &VoterAddress,
        amount: TokenAmount,
    ) -> Result<TokenAmount, PollError> {
        if !self.phase.accepts_locks() {
            return Err(PollError::WrongPhase {
                operation: "lock",
                phase: self.phase,
            });
        }
        self.reject_escrow(voter)?;
        let locked = self.custody.lock(self.asset.as_ref(), voter, amount)?;
        self.events.push(PollEvent::Locked {
            voter: voter.clone(),
            amount,
            locked,
        });
        Ok(locked)
    }

    /// Cast a plain ballot carrying `weight` of the voter's locked amount.
    pub fn vote(
        &mut self,
        voter: &VoterAddress,
        ballot: Ballot,
        weight: TokenAmount,
    ) -> Result<(), PollError> {
        self.require_phase("vote", PollPhase::Active)?;
        self.reject_escrow(voter)?;
        let domain = self.active_domain("vote")?;
        let locked = self.custody.locked_amount(voter);
        self.ledger.record(voter, ballot, weight, locked, &domain)?;

        debug!(voter = %voter, %weight, "ballot recorded");
        if self.config.emit_ballot_events {
            self.events.push(PollEvent::Vote {
                voter: voter.clone(),
                ballot,
                weight,
            });
        }
        Ok(())
    }

    /// Submit a hash commitment to a ballot (secure polls).
    pub fn commit(
        &mut self,
        voter: &VoterAddress,
        commitment: CommitmentHash,
        weight: TokenAmount,
    ) -> Result<(), PollError> {
        self.require_phase("commit", PollPhase::CommitOpen)?;
        self.reject_escrow(voter)?;
        let locked = self.custody.locked_amount(voter);
        let phase = self.phase;
        let engine = self
            .commit_reveal
            .as_mut()
            .ok_or(PollError::WrongPhase {
                operation: "commit",
                phase,
            })?;
        engine.commit(voter, commitment, weight, locked)?;

        debug!(voter = %voter, %weight, %commitment, "commitment recorded");
        self.events.push(PollEvent::Committed {
            voter: voter.clone(),
            commitment,
            weight,
        });
        Ok(())
    }

    /// Close commitments and start accepting reveals (secure polls).
    pub fn open_reveal(&mut self) -> Result<(), PollError> {
        self.require_phase("open_reveal", PollPhase::CommitOpen)?;
        self.phase = PollPhase::RevealOpen;
        self.events.push(PollEvent::RevealOpened);
        let commitments = self
            .commit_reveal
            .as_ref()
            .map_or(0, CommitRevealEngine::commitment_count);
        info!(commitments, "reveal phase opened");
        Ok(())
    }

    /// Open a previously committed ballot (secure polls).
    ///
    /// A mismatching preimage either excludes the voter (returning
    /// [`RevealOutcome::Mismatched`]) or fails with `CommitMismatch`,
    /// depending on the configured [`crate::MismatchPolicy`].
    pub fn reveal(
        &mut self,
        voter: &VoterAddress,
        ballot: Ballot,
        salt: &Salt,
    ) -> Result<RevealOutcome, PollError> {
        self.require_phase("reveal", PollPhase::RevealOpen)?;
        let domain = self.active_domain("reveal")?;
        let phase = self.phase;
        let engine = self
            .commit_reveal
            .as_mut()
            .ok_or(PollError::WrongPhase {
                operation: "reveal",
                phase,
            })?;
        let outcome = match engine.reveal(&mut self.ledger, voter, ballot, salt, &domain) {
            Ok(outcome) => outcome,
            Err(err @ PollError::CommitMismatch(_)) => {
                warn!(voter = %voter, "reveal does not match commitment, aborted");
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        match outcome {
            RevealOutcome::Accepted(_) => {
                debug!(voter = %voter, "commitment revealed");
                if self.config.emit_ballot_events {
                    self.events.push(PollEvent::Reveal {
                        voter: voter.clone(),
                        ballot,
                        salt: *salt,
                    });
                }
            }
            RevealOutcome::Mismatched => {
                warn!(voter = %voter, "reveal does not match commitment, weight excluded");
                self.events.push(PollEvent::RevealRejected {
                    voter: voter.clone(),
                });
            }
        }
        Ok(outcome)
    }

    /// Tally the finalized ballots, publish the result and close the poll.
    ///
    /// Fails without changing phase when the aggregate is undefined.
    pub fn end_poll(&mut self) -> Result<i128, PollError> {
        if !self.phase.can_end() {
            return Err(PollError::NotReadyToEnd(self.phase));
        }
        let domain = self.active_domain("end_poll")?;
        let ballots = self.ledger.ballots();
        let result = self.config.strategy.aggregate(&domain, &ballots)?;

        self.phase = PollPhase::Ended;
        self.result = Some(result);
        self.events.push(PollEvent::PollResult { result });
        info!(
            strategy = self.config.strategy.name(),
            ballots = ballots.len(),
            %result,
            "poll ended"
        );
        Ok(result)
    }

    /// Return `voter`'s escrowed amount once the poll has ended.
    pub fn release(&mut self, voter: &VoterAddress) -> Result<TokenAmount, PollError> {
        self.require_phase("release", PollPhase::Ended)?;
        let amount = self.custody.release(self.asset.as_ref(), voter)?;
        self.events.push(PollEvent::Released {
            voter: voter.clone(),
            amount,
        });
        Ok(amount)
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub fn domain(&self) -> Option<&DomainParams> {
        self.domain.as_ref()
    }

    pub fn escrow(&self) -> &VoterAddress {
        self.custody.escrow()
    }

    pub fn locked_amount(&self, voter: &VoterAddress) -> TokenAmount {
        self.custody.locked_amount(voter)
    }

    pub fn total_locked(&self) -> TokenAmount {
        self.custody.total_locked()
    }

    pub fn ballot(&self, voter: &VoterAddress) -> Option<&BallotRecord> {
        self.ledger.get(voter)
    }

    pub fn commitment(&self, voter: &VoterAddress) -> Option<&CommitmentRecord> {
        self.commit_reveal.as_ref().and_then(|e| e.get(voter))
    }

    /// Ballots that will count (or counted) toward the result.
    pub fn ballots(&self) -> Vec<WeightedBallot> {
        self.ledger.ballots()
    }

    pub fn events(&self) -> &[PollEvent] {
        self.events.as_slice()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.events
    }

    /// The published result, once the poll has ended.
    pub fn result(&self) -> Option<i128> {
        self.result
    }
}
