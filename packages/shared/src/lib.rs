//! Shared utilities for staychat.
//!
//! Logging setup and time helpers used by both the server and the CLI
//! client.

pub mod logger;
pub mod time;

pub use logger::setup_logger;
pub use time::now_pht_timestamp;
