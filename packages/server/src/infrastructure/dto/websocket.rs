//! WebSocket message DTOs for the chat server.
//!
//! Events are tagged JSON variants; frames that do not parse into a known
//! variant are logged and ignored by the handler rather than coerced into
//! a message.

use serde::{Deserialize, Serialize};

/// Events a client may send over the WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Join (or switch to) a room under a display name
    JoinRoom { username: String, room: String },
    /// Send a chat message to the sender's current room
    SendMessage {
        message: String,
        username: String,
        room: String,
        sent_at: i64,
    },
    /// Leave the current room. The fields are accepted for wire
    /// compatibility; the server acts on the connection's registered
    /// membership only.
    LeaveRoom { username: String, room: String },
}

/// Events the server pushes to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Chat body or system notice
    ReceiveMessage {
        message: String,
        username: String,
        sent_at: i64,
    },
    /// Presence snapshot of the room, sent after every membership change
    ChatroomUsers { users: Vec<RoomUser> },
}

/// One entry of a presence snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomUser {
    pub id: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_join_room_parses() {
        // テスト項目: join_room イベントをタグ付き JSON からパースできる
        // given (前提条件):
        let json = r#"{"type":"join_room","username":"alice","room":"lobby"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::JoinRoom {
                username: "alice".to_string(),
                room: "lobby".to_string(),
            }
        );
    }

    #[test]
    fn test_client_event_unknown_tag_fails() {
        // テスト項目: 未知のタグはエラーになる（握りつぶさない）
        // given (前提条件):
        let json = r#"{"type":"shout","message":"hi"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_server_event_serializes_with_snake_case_tag() {
        // テスト項目: サーバイベントは snake_case のタグ付きで直列化される
        // given (前提条件):
        let event = ServerEvent::ReceiveMessage {
            message: "hi".to_string(),
            username: "alice".to_string(),
            sent_at: 1000,
        };

        // when (操作):
        let json = serde_json::to_string(&event).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""type":"receive_message""#));
        assert!(json.contains(r#""sent_at":1000"#));
    }
}
