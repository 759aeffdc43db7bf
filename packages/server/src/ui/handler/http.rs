//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    domain::RoomName,
    infrastructure::dto::{
        http::{MessageDto, RoomDetailDto, RoomSummaryDto},
        websocket::RoomUser,
    },
    ui::state::{AppState, HistoryQuery},
};

/// Default number of messages returned by the history endpoint
const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the list of rooms that currently have members
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let mut summaries = Vec::new();
    for name in state.registry.room_names().await {
        let members = state.registry.members_of(&name).await;
        summaries.push(RoomSummaryDto {
            name: name.into_string(),
            user_count: members.len(),
        });
    }
    Json(summaries)
}

/// Get room presence detail by name
pub async fn room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room = RoomName::try_from(room).map_err(|_| StatusCode::NOT_FOUND)?;
    let members = state.registry.members_of(&room).await;
    if members.is_empty() {
        // A room without members does not exist
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(RoomDetailDto {
        name: room.into_string(),
        users: members
            .iter()
            .map(|m| RoomUser {
                id: m.id.as_str().to_string(),
                username: m.username.as_str().to_string(),
            })
            .collect(),
    }))
}

/// Get recent messages of a room from the history store
pub async fn room_messages(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    let room = RoomName::try_from(room).map_err(|_| StatusCode::NOT_FOUND)?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let messages = state.history.recent(&room, limit).await.map_err(|e| {
        tracing::warn!("History read failed for room '{}': {}", room, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(
        messages
            .into_iter()
            .map(|m| MessageDto {
                username: m.username.into_string(),
                message: m.body.into_string(),
                sent_at: m.sent_at.value(),
            })
            .collect(),
    ))
}
