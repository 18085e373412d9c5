//! Commit-reveal layer for secure polls.
//!
//! During the commit phase only hashes and weights are stored. Reveals are
//! checked against the stored hash and, on a match, recorded in the
//! [`BallotLedger`] that feeds aggregation. Voters that never reveal, or
//! whose reveal does not match, contribute no weight.

use crate::error::PollError;
use crate::ledger::{check_weight, BallotLedger};
use crate::params::DomainParams;
use serde::{Deserialize, Serialize};
use stakepoll_crypto::verify_commitment;
use stakepoll_types::{Ballot, CommitmentHash, Salt, TokenAmount, VoterAddress};
use std::collections::BTreeMap;

/// What happens when a revealed `(ballot, salt)` does not match the commitment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// The reveal completes, the commitment is marked rejected and its weight
    /// is excluded for good.
    #[default]
    Exclude,
    /// The reveal fails with `CommitMismatch` and nothing changes; the voter
    /// may try again with the right preimage.
    Abort,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealStatus {
    Pending,
    Revealed(Ballot),
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentRecord {
    pub weight: TokenAmount,
    pub commitment: CommitmentHash,
    pub status: RevealStatus,
}

/// Result of a reveal call that did not abort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The preimage matched; the ballot now counts.
    Accepted(Ballot),
    /// The preimage did not match; the commitment is excluded.
    Mismatched,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRevealEngine {
    commitments: BTreeMap<VoterAddress, CommitmentRecord>,
    policy: MismatchPolicy,
}

impl CommitRevealEngine {
    pub fn new(policy: MismatchPolicy) -> Self {
        Self {
            commitments: BTreeMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> MismatchPolicy {
        self.policy
    }

    /// Store `voter`'s commitment and weight. The ballot itself is never seen here.
    pub fn commit(
        &mut self,
        voter: &VoterAddress,
        commitment: CommitmentHash,
        weight: TokenAmount,
        locked: TokenAmount,
    ) -> Result<(), PollError> {
        check_weight(weight, locked)?;
        if self.commitments.contains_key(voter) {
            return Err(PollError::NoDoubleCommit(voter.to_string()));
        }
        self.commitments.insert(
            voter.clone(),
            CommitmentRecord {
                weight,
                commitment,
                status: RevealStatus::Pending,
            },
        );
        Ok(())
    }

    /// Open `voter`'s commitment and, on a match, record the ballot in `ledger`.
    pub fn reveal(
        &mut self,
        ledger: &mut BallotLedger,
        voter: &VoterAddress,
        ballot: Ballot,
        salt: &Salt,
        domain: &DomainParams,
    ) -> Result<RevealOutcome, PollError> {
        let record = self
            .commitments
            .get_mut(voter)
            .ok_or_else(|| PollError::NoCommitment(voter.to_string()))?;
        if record.status != RevealStatus::Pending {
            return Err(PollError::NoDoubleReveal(voter.to_string()));
        }

        if !verify_commitment(&record.commitment, voter, &ballot, salt) {
            return match self.policy {
                MismatchPolicy::Exclude => {
                    record.status = RevealStatus::Rejected;
                    Ok(RevealOutcome::Mismatched)
                }
                MismatchPolicy::Abort => Err(PollError::CommitMismatch(voter.to_string())),
            };
        }

        // The committed weight was bounded by the lock at commit time.
        ledger.record(voter, ballot, record.weight, record.weight, domain)?;
        record.status = RevealStatus::Revealed(ballot);
        Ok(RevealOutcome::Accepted(ballot))
    }

    pub fn get(&self, voter: &VoterAddress) -> Option<&CommitmentRecord> {
        self.commitments.get(voter)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VoterAddress, &CommitmentRecord)> {
        self.commitments.iter()
    }

    pub fn commitment_count(&self) -> usize {
        self.commitments.len()
    }

    fn count_status(&self, pred: impl Fn(&RevealStatus) -> bool) -> usize {
        self.commitments.values().filter(|r| pred(&r.status)).count()
    }

    pub fn pending_count(&self) -> usize {
        self.count_status(|s| *s == RevealStatus::Pending)
    }

    pub fn revealed_count(&self) -> usize {
        self.count_status(|s| matches!(s, RevealStatus::Revealed(_)))
    }

    pub fn rejected_count(&self) -> usize {
        self.count_status(|s| *s == RevealStatus::Rejected)
    }
}
