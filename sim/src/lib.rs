//! stakepoll simulator.
//!
//! Drives a [`stakepoll_poll::PollController`] over an in-memory governance
//! asset from a TOML scenario: initial balances plus an ordered list of
//! calls, each optionally expected to fail with a named error kind.

pub mod config;
pub mod error;
pub mod scenario;

pub use config::{AccountConfig, ScriptedStep, SimConfig, Step};
pub use error::SimError;
pub use scenario::{run_scenario, write_events, write_snapshot, Scenario, ScenarioReport};
