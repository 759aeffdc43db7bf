//! HTTP API response DTOs for the chat server.

use serde::{Deserialize, Serialize};

use super::websocket::RoomUser;

/// Room summary for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub user_count: usize,
}

/// Room presence detail for the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub users: Vec<RoomUser>,
}

/// One recent message for the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub username: String,
    pub message: String,
    pub sent_at: i64,
}
