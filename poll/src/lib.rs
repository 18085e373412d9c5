//! Staked, weighted range polls.
//!
//! Voters lock a governance asset as weight, cast a bounded ballot (or a
//! hash commitment to one, for secure polls), and a strategy fixed at
//! construction reduces the weighted ballots to one result at close.
//!
//! Lifecycle: `Created → Active → Ended`, or for secure polls
//! `Created → CommitOpen → RevealOpen → Ended`.
//!
//! Strategies: weighted mean, weighted median, clustered mean and increment.

pub mod aggregation;
pub mod asset;
pub mod commit_reveal;
pub mod config;
pub mod controller;
pub mod custody;
pub mod error;
pub mod events;
pub mod ledger;
pub mod params;
pub mod phase;
pub mod snapshot;

pub use aggregation::{AggregationStrategy, WeightedBallot};
pub use asset::{AssetError, GovernanceAsset};
pub use commit_reveal::{
    CommitRevealEngine, CommitmentRecord, MismatchPolicy, RevealOutcome, RevealStatus,
};
pub use config::PollConfig;
pub use controller::PollController;
pub use custody::WeightCustody;
pub use error::PollError;
pub use events::{EventLog, PollEvent};
pub use ledger::{BallotLedger, BallotRecord};
pub use params::DomainParams;
pub use phase::PollPhase;
pub use snapshot::PollSnapshot;
