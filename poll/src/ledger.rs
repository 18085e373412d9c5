//! Ballot ledger — append-only, one record per voter.

use crate::aggregation::WeightedBallot;
use crate::error::PollError;
use crate::params::DomainParams;
use serde::{Deserialize, Serialize};
use stakepoll_types::{Ballot, TokenAmount, VoterAddress};
use std::collections::BTreeMap;

/// A recorded ballot. Never mutated once written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotRecord {
    pub weight: TokenAmount,
    pub ballot: Ballot,
}

/// Check that `weight` is positive and covered by `locked`.
pub(crate) fn check_weight(weight: TokenAmount, locked: TokenAmount) -> Result<(), PollError> {
    if weight > locked {
        return Err(PollError::InsufficientLockedWeight {
            have: locked.raw(),
            need: weight.raw(),
        });
    }
    if weight.is_zero() {
        return Err(PollError::ZeroAmount);
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotLedger {
    records: BTreeMap<VoterAddress, BallotRecord>,
}

impl BallotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `voter`'s ballot with `weight`, bounded by their `locked` amount.
    ///
    /// All checks run before the write, so a rejected ballot changes nothing.
    pub fn record(
        &mut self,
        voter: &VoterAddress,
        ballot: Ballot,
        weight: TokenAmount,
        locked: TokenAmount,
        domain: &DomainParams,
    ) -> Result<BallotRecord, PollError> {
        check_weight(weight, locked)?;
        if self.records.contains_key(voter) {
            return Err(PollError::NoDoubleVote(voter.to_string()));
        }
        if !domain.contains(&ballot) {
            return Err(PollError::OutOfDomain {
                ballot: ballot.to_string(),
                domain: domain.to_string(),
            });
        }
        let record = BallotRecord { weight, ballot };
        self.records.insert(voter.clone(), record);
        Ok(record)
    }

    pub fn get(&self, voter: &VoterAddress) -> Option<&BallotRecord> {
        self.records.get(voter)
    }

    pub fn has_voted(&self, voter: &VoterAddress) -> bool {
        self.records.contains_key(voter)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The finalized ballot set handed to the aggregation strategy.
    pub fn ballots(&self) -> Vec<WeightedBallot> {
        self.records
            .values()
            .map(|r| WeightedBallot::new(r.ballot, r.weight))
            .collect()
    }

    /// Sum of recorded weights, saturating.
    pub fn total_weight(&self) -> TokenAmount {
        self.records
            .values()
            .fold(TokenAmount::ZERO, |acc, r| acc.saturating_add(r.weight))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VoterAddress, &BallotRecord)> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(name: &str) -> VoterAddress {
        VoterAddress::new(name)
    }

    fn amt(raw: u128) -> TokenAmount {
        TokenAmount::new(raw)
    }

    #[test]
    fn records_once_per_voter() {
        let mut ledger = BallotLedger::new();
        let domain = DomainParams::range(0, 100);
        ledger
            .record(&voter("alice"), Ballot::Value(29), amt(50), amt(50), &domain)
            .unwrap();
        let err = ledger
            .record(&voter("alice"), Ballot::Value(31), amt(10), amt(50), &domain)
            .unwrap_err();
        assert_eq!(err, PollError::NoDoubleVote("alice".into()));
        assert_eq!(ledger.get(&voter("alice")).unwrap().ballot, Ballot::Value(29));
    }

    #[test]
    fn weight_must_be_covered_by_lock() {
        let mut ledger = BallotLedger::new();
        let err = ledger
            .record(
                &voter("bob"),
                Ballot::Value(1),
                amt(81),
                amt(80),
                &DomainParams::range(0, 100),
            )
            .unwrap_err();
        assert_eq!(err, PollError::InsufficientLockedWeight { have: 80, need: 81 });
        assert!(ledger.is_empty());
    }

    #[test]
    fn zero_weight_rejected() {
        let mut ledger = BallotLedger::new();
        let err = ledger
            .record(
                &voter("bob"),
                Ballot::Value(1),
                amt(0),
                amt(80),
                &DomainParams::range(0, 100),
            )
            .unwrap_err();
        assert_eq!(err, PollError::ZeroAmount);
    }

    #[test]
    fn out_of_domain_rejected_without_record() {
        let mut ledger = BallotLedger::new();
        let err = ledger
            .record(
                &voter("carol"),
                Ballot::Value(101),
                amt(5),
                amt(5),
                &DomainParams::range(0, 100),
            )
            .unwrap_err();
        assert!(matches!(err, PollError::OutOfDomain { .. }));
        assert!(!ledger.has_voted(&voter("carol")));
    }

    #[test]
    fn ballots_and_total_weight() {
        let mut ledger = BallotLedger::new();
        let domain = DomainParams::increment(500, 5);
        ledger
            .record(&voter("a"), Ballot::Signal(false), amt(10), amt(10), &domain)
            .unwrap();
        ledger
            .record(&voter("b"), Ballot::Signal(true), amt(20), amt(25), &domain)
            .unwrap();
        assert_eq!(ledger.total_weight(), amt(30));
        assert_eq!(ledger.ballots().len(), 2);
    }
}
