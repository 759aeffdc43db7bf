//! WebSocket chat server: handlers, state, runner.

pub mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{app, run};
