//! staychat server library.
//!
//! Real-time chat presence and broadcast: connections join named rooms
//! over WebSocket, the room registry keeps the authoritative view of who
//! is where, and messages and system notices fan out to room members.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry point
pub use ui::run as run_server;
