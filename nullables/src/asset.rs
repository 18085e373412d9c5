//! Nullable governance asset — an in-memory fungible token.

use stakepoll_poll::{AssetError, GovernanceAsset};
use stakepoll_types::{TokenAmount, VoterAddress};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A settled transfer, recorded for assertions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRecord {
    pub from: VoterAddress,
    pub to: VoterAddress,
    pub amount: TokenAmount,
}

/// An in-memory governance asset for tests and simulations.
///
/// Balances are created with [`NullAsset::mint`]. Transfers settle
/// atomically and are journalled. [`NullAsset::fail_next_transfer`] makes the
/// next transfer fail without moving anything.
#[derive(Default)]
pub struct NullAsset {
    balances: Mutex<HashMap<VoterAddress, TokenAmount>>,
    journal: Mutex<Vec<TransferRecord>>,
    fail_next: Mutex<Option<String>>,
}

fn guard<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NullAsset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial balances.
    pub fn with_balances(balances: impl IntoIterator<Item = (VoterAddress, TokenAmount)>) -> Self {
        let asset = Self::new();
        for (account, amount) in balances {
            asset.mint(&account, amount);
        }
        asset
    }

    /// Credit `amount` to `account` out of thin air, saturating at `u128::MAX`.
    pub fn mint(&self, account: &VoterAddress, amount: TokenAmount) {
        let mut balances = guard(&self.balances);
        let entry = balances.entry(account.clone()).or_insert(TokenAmount::ZERO);
        *entry = entry.saturating_add(amount);
    }

    /// Make the next `transfer_from` fail with `TransferRejected(reason)`.
    pub fn fail_next_transfer(&self, reason: impl Into<String>) {
        *guard(&self.fail_next) = Some(reason.into());
    }

    /// All transfers that settled, in order.
    pub fn transfers(&self) -> Vec<TransferRecord> {
        guard(&self.journal).clone()
    }

    /// Sum of every balance.
    pub fn total_supply(&self) -> TokenAmount {
        guard(&self.balances)
            .values()
            .fold(TokenAmount::ZERO, |acc, b| acc.saturating_add(*b))
    }
}

impl GovernanceAsset for NullAsset {
    fn balance_of(&self, account: &VoterAddress) -> TokenAmount {
        guard(&self.balances)
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    fn transfer_from(
        &self,
        from: &VoterAddress,
        to: &VoterAddress,
        amount: TokenAmount,
    ) -> Result<(), AssetError> {
        if let Some(reason) = guard(&self.fail_next).take() {
            return Err(AssetError::TransferRejected(reason));
        }

        let mut balances = guard(&self.balances);
        let available = balances.get(from).copied().unwrap_or(TokenAmount::ZERO);
        let debited = available
            .checked_sub(amount)
            .ok_or_else(|| AssetError::InsufficientBalance {
                account: from.to_string(),
                needed: amount.raw(),
                available: available.raw(),
            })?;
        if from != to {
            let credited = balances
                .get(to)
                .copied()
                .unwrap_or(TokenAmount::ZERO)
                .checked_add(amount)
                .ok_or_else(|| AssetError::Overflow(to.to_string()))?;
            balances.insert(from.clone(), debited);
            balances.insert(to.clone(), credited);
        }
        drop(balances);

        guard(&self.journal).push(TransferRecord {
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        Ok(())
    }
}
