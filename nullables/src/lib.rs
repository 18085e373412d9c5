//! Nullable infrastructure for deterministic testing.
//!
//! External collaborators are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (including failure injection)
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests and simulations.

pub mod asset;

pub use asset::{NullAsset, TransferRecord};
