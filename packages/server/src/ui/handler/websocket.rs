//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, MessageBody, RoomName, Timestamp, Username},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::{AppState, ClientInfo},
    usecase::{
        DisconnectUseCase, JoinRoomUseCase, LeaveRoomUseCase, Outbound, SendMessageUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Allocate the connection identity and its outbound channel
    let connection_id = ConnectionIdFactory::generate();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    {
        let mut connections = state.connections.lock().await;
        connections.insert(connection_id.clone(), ClientInfo { sender: tx });
    }
    tracing::info!("Connection '{}' established", connection_id);

    let (mut sender, mut receiver) = socket.split();

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();

    // Spawn a task to receive events from this client and dispatch them
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring malformed frame from '{}': {}",
                                recv_connection_id,
                                e
                            );
                            continue;
                        }
                    };
                    dispatch(&recv_state, &recv_connection_id, event).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping from '{}'", recv_connection_id);
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued outbound events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Teardown runs exactly once per connection, whether the client closed
    // cleanly, the transport failed, or a room was never joined. The
    // registry's idempotent leave keeps a raced explicit leave_room from
    // producing a second notice.
    state.connections.lock().await.remove(&connection_id);
    let disconnect_usecase = DisconnectUseCase::new(state.registry.clone());
    let plan = disconnect_usecase.execute(connection_id.clone()).await;
    deliver(&state, plan).await;
    tracing::info!("Connection '{}' cleaned up", connection_id);
}

/// Dispatch one parsed client event to its usecase and deliver the plan.
async fn dispatch(state: &Arc<AppState>, connection_id: &ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::JoinRoom { username, room } => {
            let (username, room) = match (Username::try_from(username), RoomName::try_from(room))
            {
                (Ok(username), Ok(room)) => (username, room),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!("Ignoring join from '{}': {}", connection_id, e);
                    return;
                }
            };
            let usecase = JoinRoomUseCase::new(state.registry.clone());
            let plan = usecase.execute(connection_id.clone(), username, room).await;
            deliver(state, plan).await;
        }
        ClientEvent::SendMessage {
            message,
            username,
            room,
            sent_at,
        } => {
            let (body, username, room) = match (
                MessageBody::try_from(message),
                Username::try_from(username),
                RoomName::try_from(room),
            ) {
                (Ok(body), Ok(username), Ok(room)) => (body, username, room),
                (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                    tracing::warn!("Ignoring message from '{}': {}", connection_id, e);
                    return;
                }
            };
            let usecase = SendMessageUseCase::new(state.registry.clone(), state.history.clone());
            let plan = usecase
                .execute(
                    connection_id.clone(),
                    username,
                    room,
                    body,
                    Timestamp::new(sent_at),
                )
                .await;
            deliver(state, plan).await;
        }
        ClientEvent::LeaveRoom { .. } => {
            // Membership is keyed by connection id; the payload fields are
            // not consulted.
            let usecase = LeaveRoomUseCase::new(state.registry.clone());
            let plan = usecase.execute(connection_id.clone()).await;
            deliver(state, plan).await;
        }
    }
}

/// Deliver a plan over the per-connection channels.
///
/// Channels are unbounded, so a slow recipient never blocks the others; a
/// failed send (recipient mid-teardown) is logged and skipped.
async fn deliver(state: &AppState, plan: Vec<Outbound>) {
    if plan.is_empty() {
        return;
    }
    let connections = state.connections.lock().await;
    for outbound in plan {
        let Some(client) = connections.get(&outbound.target) else {
            // Recipient disconnected between plan construction and delivery
            continue;
        };
        let json = serde_json::to_string(&outbound.event).unwrap();
        if client.sender.send(json).is_err() {
            tracing::warn!("Failed to deliver event to '{}'", outbound.target);
        }
    }
}
