//! Server state and connection management.

use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ConnectionId, HistoryStore, RoomRegistry},
    infrastructure::{InMemoryHistoryStore, InMemoryRoomRegistry},
};

/// Query parameters for the room history endpoint
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Client connection information
pub struct ClientInfo {
    /// Message sender channel
    pub sender: mpsc::UnboundedSender<String>,
}

/// Shared application state
pub struct AppState {
    /// Room Registry（プレゼンスの唯一の正）
    pub registry: Arc<dyn RoomRegistry>,
    /// History store（外部コラボレータの境界）
    pub history: Arc<dyn HistoryStore>,
    /// WebSocket sender channels for delivery, keyed by connection id
    pub connections: Arc<Mutex<HashMap<ConnectionId, ClientInfo>>>,
}

impl AppState {
    /// Create state backed by the in-memory registry and history store
    pub fn new() -> Self {
        Self {
            registry: Arc::new(InMemoryRoomRegistry::new()),
            history: Arc::new(InMemoryHistoryStore::new()),
            connections: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
