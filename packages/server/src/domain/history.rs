//! Message history boundary.
//!
//! History persistence is an external collaborator: the core only calls
//! through this narrow interface, and every failure behind it is logged
//! rather than propagated into live delivery.

use async_trait::async_trait;

use super::{
    entity::ChatMessage,
    error::HistoryError,
    value_object::RoomName,
};

/// Narrow save/query interface over wherever history actually lives.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Record a delivered message.
    async fn save(&self, message: ChatMessage) -> Result<(), HistoryError>;

    /// The most recent messages of a room, oldest first, at most `limit`.
    async fn recent(&self, room: &RoomName, limit: usize)
        -> Result<Vec<ChatMessage>, HistoryError>;
}
