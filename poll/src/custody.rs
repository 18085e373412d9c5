//! Weight custody — escrowed governance-asset amounts per voter.
//!
//! Locked amounts bound the weight a voter may attach to a ballot or
//! commitment. Escrow is only credited after the asset confirms the
//! transfer, and only debited after the asset confirms the release.

use crate::asset::GovernanceAsset;
use crate::error::PollError;
use serde::{Deserialize, Serialize};
use stakepoll_types::{TokenAmount, VoterAddress};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightCustody {
    /// Account holding escrowed funds on the asset.
    escrow: VoterAddress,
    /// voter → amount currently held in escrow for them.
    locked: BTreeMap<VoterAddress, TokenAmount>,
    /// Sum of all `locked` entries.
    total_locked: TokenAmount,
}

impl WeightCustody {
    pub fn new(escrow: VoterAddress) -> Self {
        Self {
            escrow,
            locked: BTreeMap::new(),
            total_locked: TokenAmount::ZERO,
        }
    }

    pub fn escrow(&self) -> &VoterAddress {
        &self.escrow
    }

    /// Move `amount` from `voter` into escrow. Returns the voter's new locked total.
    ///
    /// Repeat locks top up the existing entry. Totals are computed before the
    /// transfer so that nothing can fail once funds have moved.
    pub fn lock(
        &mut self,
        asset: &dyn GovernanceAsset,
        voter: &VoterAddress,
        amount: TokenAmount,
    ) -> Result<TokenAmount, PollError> {
        if voter == &self.escrow {
            return Err(PollError::EscrowCannotVote(voter.to_string()));
        }
        if amount.is_zero() {
            return Err(PollError::ZeroAmount);
        }
        let new_locked = self
            .locked_amount(voter)
            .checked_add(amount)
            .ok_or(PollError::Overflow)?;
        let new_total = self
            .total_locked
            .checked_add(amount)
            .ok_or(PollError::Overflow)?;

        asset.transfer_from(voter, &self.escrow, amount)?;

        self.locked.insert(voter.clone(), new_locked);
        self.total_locked = new_total;
        debug!(voter = %voter, amount = %amount, locked = %new_locked, "weight locked");
        Ok(new_locked)
    }

    /// Return the voter's entire escrowed amount to them. Returns the amount released.
    pub fn release(
        &mut self,
        asset: &dyn GovernanceAsset,
        voter: &VoterAddress,
    ) -> Result<TokenAmount, PollError> {
        let amount = self.locked_amount(voter);
        if amount.is_zero() {
            return Err(PollError::NothingLocked(voter.to_string()));
        }
        let new_total = self
            .total_locked
            .checked_sub(amount)
            .ok_or(PollError::Overflow)?;

        asset.transfer_from(&self.escrow, voter, amount)?;

        self.locked.remove(voter);
        self.total_locked = new_total;
        debug!(voter = %voter, amount = %amount, "weight released");
        Ok(amount)
    }

    /// Amount currently escrowed for `voter` (zero if none).
    pub fn locked_amount(&self, voter: &VoterAddress) -> TokenAmount {
        self.locked.get(voter).copied().unwrap_or(TokenAmount::ZERO)
    }

    pub fn total_locked(&self) -> TokenAmount {
        self.total_locked
    }

    /// Check the invariants `lock` and `release` maintain: no zero entries, no
    /// entry for the escrow account, and `total_locked` equal to their sum.
    pub(crate) fn check_consistent(&self) -> Result<(), String> {
        if self.locked.contains_key(&self.escrow) {
            return Err(format!("escrow account {} holds a lock", self.escrow));
        }
        let mut sum = TokenAmount::ZERO;
        for (voter, amount) in &self.locked {
            if amount.is_zero() {
                return Err(format!("zero lock entry for {voter}"));
            }
            sum = sum
                .checked_add(*amount)
                .ok_or_else(|| "locked entries overflow".to_string())?;
        }
        if sum != self.total_locked {
            return Err(format!(
                "total locked {} does not match entries summing to {sum}",
                self.total_locked
            ));
        }
        Ok(())
    }

    /// Number of voters with a non-zero escrow entry.
    pub fn voter_count(&self) -> usize {
        self.locked.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal in-file asset; the full nullable lives in stakepoll-nullables.
    struct TestAsset {
        balances: Mutex<HashMap<VoterAddress, u128>>,
        reject: bool,
    }

    impl TestAsset {
        fn with(balances: &[(&str, u128)]) -> Self {
            Self {
                balances: Mutex::new(
                    balances
                        .iter()
                        .map(|(a, b)| (VoterAddress::new(*a), *b))
                        .collect(),
                ),
                reject: false,
            }
        }

        fn balance(&self, who: &str) -> u128 {
            self.balance_of(&VoterAddress::new(who)).raw()
        }
    }

    impl GovernanceAsset for TestAsset {
        fn balance_of(&self, account: &VoterAddress) -> TokenAmount {
            TokenAmount::new(*self.balances.lock().unwrap().get(account).unwrap_or(&0))
        }

        fn transfer_from(
            &self,
            from: &VoterAddress,
            to: &VoterAddress,
            amount: TokenAmount,
        ) -> Result<(), AssetError> {
            if self.reject {
                return Err(AssetError::TransferRejected("test".into()));
            }
            let mut balances = self.balances.lock().unwrap();
            let have = *balances.get(from).unwrap_or(&0);
            if have < amount.raw() {
                return Err(AssetError::InsufficientBalance {
                    account: from.to_string(),
                    needed: amount.raw(),
                    available: have,
                });
            }
            balances.insert(from.clone(), have - amount.raw());
            *balances.entry(to.clone()).or_insert(0) += amount.raw();
            Ok(())
        }
    }

    fn addr(name: &str) -> VoterAddress {
        VoterAddress::new(name)
    }

    #[test]
    fn lock_moves_funds_into_escrow() {
        let asset = TestAsset::with(&[("alice", 100)]);
        let mut custody = WeightCustody::new(addr("poll"));
        let locked = custody
            .lock(&asset, &addr("alice"), TokenAmount::new(60))
            .unwrap();

        assert_eq!(locked, TokenAmount::new(60));
        assert_eq!(custody.locked_amount(&addr("alice")), TokenAmount::new(60));
        assert_eq!(custody.total_locked(), TokenAmount::new(60));
        assert_eq!(asset.balance("alice"), 40);
        assert_eq!(asset.balance("poll"), 60);
    }

    #[test]
    fn repeat_locks_top_up() {
        let asset = TestAsset::with(&[("alice", 100)]);
        let mut custody = WeightCustody::new(addr("poll"));
        custody.lock(&asset, &addr("alice"), TokenAmount::new(30)).unwrap();
        custody.lock(&asset, &addr("alice"), TokenAmount::new(20)).unwrap();
        assert_eq!(custody.locked_amount(&addr("alice")), TokenAmount::new(50));
        assert_eq!(custody.voter_count(), 1);
    }

    #[test]
    fn zero_lock_rejected() {
        let asset = TestAsset::with(&[("alice", 100)]);
        let mut custody = WeightCustody::new(addr("poll"));
        assert_eq!(
            custody.lock(&asset, &addr("alice"), TokenAmount::ZERO),
            Err(PollError::ZeroAmount)
        );
    }

    #[test]
    fn failed_transfer_leaves_no_trace() {
        let asset = TestAsset::with(&[("alice", 10)]);
        let mut custody = WeightCustody::new(addr("poll"));
        let err = custody
            .lock(&asset, &addr("alice"), TokenAmount::new(11))
            .unwrap_err();
        assert!(matches!(err, PollError::Asset(AssetError::InsufficientBalance { .. })));
        assert_eq!(custody.locked_amount(&addr("alice")), TokenAmount::ZERO);
        assert_eq!(custody.total_locked(), TokenAmount::ZERO);
        assert_eq!(asset.balance("alice"), 10);
    }

    #[test]
    fn escrow_cannot_lock_into_itself() {
        let asset = TestAsset::with(&[("alice", 100)]);
        let mut custody = WeightCustody::new(addr("poll"));
        custody.lock(&asset, &addr("alice"), TokenAmount::new(100)).unwrap();
        assert_eq!(
            custody.lock(&asset, &addr("poll"), TokenAmount::new(100)),
            Err(PollError::EscrowCannotVote("poll".into()))
        );
        assert_eq!(custody.locked_amount(&addr("poll")), TokenAmount::ZERO);
        assert_eq!(custody.total_locked(), TokenAmount::new(100));
    }

    #[test]
    fn release_returns_everything() {
        let asset = TestAsset::with(&[("alice", 100)]);
        let mut custody = WeightCustody::new(addr("poll"));
        custody.lock(&asset, &addr("alice"), TokenAmount::new(70)).unwrap();
        let released = custody.release(&asset, &addr("alice")).unwrap();
        assert_eq!(released, TokenAmount::new(70));
        assert_eq!(asset.balance("alice"), 100);
        assert_eq!(custody.total_locked(), TokenAmount::ZERO);
        assert_eq!(
            custody.release(&asset, &addr("alice")),
            Err(PollError::NothingLocked("alice".into()))
        );
    }

    #[test]
    fn rejected_release_keeps_escrow() {
        let mut asset = TestAsset::with(&[("alice", 100)]);
        let mut custody = WeightCustody::new(addr("poll"));
        custody.lock(&asset, &addr("alice"), TokenAmount::new(70)).unwrap();
        asset.reject = true;
        assert!(custody.release(&asset, &addr("alice")).is_err());
        assert_eq!(custody.locked_amount(&addr("alice")), TokenAmount::new(70));
    }
}
