//! Shared utilities for stakepoll.

pub mod logging;

pub use logging::{init_logging, LogFormat};
