//! Shared utilities for the MHC light client.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use time::unix_secs;
