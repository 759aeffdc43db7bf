//! InMemory History Store 実装
//!
//! ドメイン層が定義する HistoryStore trait の具体的な実装。
//! ルームごとに直近のメッセージだけを有限の VecDeque に保持します。
//! 永続化はこのコアの責務ではないため、プロセスの寿命を超えて
//! 残る必要のあるデータはここには置きません。

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, HistoryError, HistoryStore, RoomName};

/// ルームごとに保持する直近メッセージ数の既定値
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// インメモリ History Store 実装
pub struct InMemoryHistoryStore {
    rooms: Mutex<HashMap<RoomName, VecDeque<ChatMessage>>>,
    capacity: usize,
}

impl InMemoryHistoryStore {
    /// 既定の容量で新しい InMemoryHistoryStore を作成
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// 容量を指定して新しい InMemoryHistoryStore を作成
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            capacity,
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn save(&self, message: ChatMessage) -> Result<(), HistoryError> {
        let mut rooms = self.rooms.lock().await;
        let history = rooms.entry(message.room.clone()).or_default();
        history.push_back(message);
        while history.len() > self.capacity {
            history.pop_front();
        }
        Ok(())
    }

    async fn recent(
        &self,
        room: &RoomName,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, HistoryError> {
        let rooms = self.rooms.lock().await;
        let Some(history) = rooms.get(room) else {
            return Ok(Vec::new());
        };
        let skip = history.len().saturating_sub(limit);
        Ok(history.iter().skip(skip).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageBody, Timestamp, Username};

    fn message(room: &str, body: &str, sent_at: i64) -> ChatMessage {
        ChatMessage::new(
            RoomName::new(room.to_string()).unwrap(),
            Username::new("alice".to_string()).unwrap(),
            MessageBody::new(body.to_string()).unwrap(),
            Timestamp::new(sent_at),
        )
    }

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_recent() {
        // テスト項目: 保存したメッセージを送信順で取り出せる
        // given (前提条件):
        let store = InMemoryHistoryStore::new();
        store.save(message("lobby", "first", 1)).await.unwrap();
        store.save(message("lobby", "second", 2)).await.unwrap();

        // when (操作):
        let recent = store.recent(&room("lobby"), 10).await.unwrap();

        // then (期待する結果):
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].body.as_str(), "first");
        assert_eq!(recent[1].body.as_str(), "second");
    }

    #[tokio::test]
    async fn test_recent_respects_limit() {
        // テスト項目: limit 件を超える履歴は新しい方から limit 件だけ返る
        // given (前提条件):
        let store = InMemoryHistoryStore::new();
        for i in 0..5 {
            store
                .save(message("lobby", &format!("m{i}"), i))
                .await
                .unwrap();
        }

        // when (操作):
        let recent = store.recent(&room("lobby"), 2).await.unwrap();

        // then (期待する結果): 最新2件が古い順で返る
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].body.as_str(), "m3");
        assert_eq!(recent[1].body.as_str(), "m4");
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        // テスト項目: 容量を超えると古いメッセージから捨てられる
        // given (前提条件):
        let store = InMemoryHistoryStore::with_capacity(2);
        store.save(message("lobby", "m0", 0)).await.unwrap();
        store.save(message("lobby", "m1", 1)).await.unwrap();

        // when (操作): 3件目を保存
        store.save(message("lobby", "m2", 2)).await.unwrap();

        // then (期待する結果): 最古の m0 が消えている
        let recent = store.recent(&room("lobby"), 10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].body.as_str(), "m1");
        assert_eq!(recent[1].body.as_str(), "m2");
    }

    #[tokio::test]
    async fn test_recent_unknown_room_is_empty() {
        // テスト項目: 履歴のないルームの recent は空リストを返す
        // given (前提条件):
        let store = InMemoryHistoryStore::new();

        // when (操作):
        let recent = store.recent(&room("nowhere"), 10).await.unwrap();

        // then (期待する結果):
        assert!(recent.is_empty());
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        // テスト項目: 履歴はルームごとに独立している
        // given (前提条件):
        let store = InMemoryHistoryStore::new();
        store.save(message("lobby", "hello", 1)).await.unwrap();

        // when (操作):
        let den = store.recent(&room("den"), 10).await.unwrap();
        let lobby = store.recent(&room("lobby"), 10).await.unwrap();

        // then (期待する結果):
        assert!(den.is_empty());
        assert_eq!(lobby.len(), 1);
    }
}
