//! Router construction and server loop.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::{
    handler::{health_check, list_rooms, room_detail, room_messages, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router over the given state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/{room}", get(room_detail))
        .route("/api/rooms/{room}/messages", get(room_messages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn run(host: &str, port: u16) -> std::io::Result<()> {
    let state = Arc::new(AppState::new());
    let app = app(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
