//! The governance asset collaborator.
//!
//! Minting, transfers and balance accounting live outside the poll. The poll
//! only needs to read balances and move funds into and out of escrow.

use stakepoll_types::{TokenAmount, VoterAddress};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("insufficient balance for {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: String,
        needed: u128,
        available: u128,
    },

    #[error("transfer rejected: {0}")]
    TransferRejected(String),

    #[error("balance overflow for {0}")]
    Overflow(String),
}

/// Fungible governance asset used as voting weight.
///
/// `transfer_from` must settle atomically: either the full amount moves or
/// nothing does and an error is returned.
pub trait GovernanceAsset: Send + Sync {
    fn balance_of(&self, account: &VoterAddress) -> TokenAmount;

    fn transfer_from(
        &self,
        from: &VoterAddress,
        to: &VoterAddress,
        amount: TokenAmount,
    ) -> Result<(), AssetError>;
}
