use crate::asset::AssetError;
use crate::phase::PollPhase;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("poll has already been started")]
    AlreadyStarted,

    #[error("poll cannot be ended from phase {0}")]
    NotReadyToEnd(PollPhase),

    #[error("{operation} is not allowed in phase {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: PollPhase,
    },

    #[error("invalid poll domain: {0}")]
    InvalidDomain(String),

    #[error("invalid poll configuration: {0}")]
    InvalidConfig(String),

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("insufficient locked weight: have {have}, need {need}")]
    InsufficientLockedWeight { have: u128, need: u128 },

    #[error("voter {0} has already voted")]
    NoDoubleVote(String),

    #[error("voter {0} has already committed")]
    NoDoubleCommit(String),

    #[error("voter {0} has already revealed")]
    NoDoubleReveal(String),

    #[error("voter {0} has no commitment to reveal")]
    NoCommitment(String),

    #[error("ballot {ballot} is outside the poll domain {domain}")]
    OutOfDomain { ballot: String, domain: String },

    #[error("revealed ballot does not match the commitment of voter {0}")]
    CommitMismatch(String),

    #[error("aggregate is undefined: total effective weight is zero")]
    UndefinedAggregate,

    #[error("voter {0} has nothing locked")]
    NothingLocked(String),

    #[error("escrow account {0} cannot lock weight or vote")]
    EscrowCannotVote(String),

    #[error("arithmetic overflow in poll computation")]
    Overflow,

    #[error("governance asset: {0}")]
    Asset(#[from] AssetError),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl PollError {
    /// Stable, variant-level name for matching failures in scripts and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyStarted => "AlreadyStarted",
            Self::NotReadyToEnd(_) => "NotReadyToEnd",
            Self::WrongPhase { .. } => "WrongPhase",
            Self::InvalidDomain(_) => "InvalidDomain",
            Self::InvalidConfig(_) => "InvalidConfig",
            Self::ZeroAmount => "ZeroAmount",
            Self::InsufficientLockedWeight { .. } => "InsufficientLockedWeight",
            Self::NoDoubleVote(_) => "NoDoubleVote",
            Self::NoDoubleCommit(_) => "NoDoubleCommit",
            Self::NoDoubleReveal(_) => "NoDoubleReveal",
            Self::NoCommitment(_) => "NoCommitment",
            Self::OutOfDomain { .. } => "OutOfDomain",
            Self::CommitMismatch(_) => "CommitMismatch",
            Self::UndefinedAggregate => "UndefinedAggregate",
            Self::NothingLocked(_) => "NothingLocked",
            Self::EscrowCannotVote(_) => "EscrowCannotVote",
            Self::Overflow => "Overflow",
            Self::Asset(_) => "Asset",
            Self::Snapshot(_) => "Snapshot",
        }
    }
}
