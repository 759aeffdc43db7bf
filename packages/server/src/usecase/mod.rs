//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。
//!
//! 各ユースケースは「どの接続に何を届けるか」の配送プラン
//! (`Vec<Outbound>`) を返し、実際のトランスポート送信は UI 層が
//! 行います。プランの構築はルーム台帳の変更が完全に適用された
//! 後に行われるため、スナップショットが変更途中の状態を映す
//! ことはありません。

pub mod disconnect;
pub mod join_room;
pub mod leave_room;
pub mod send_message;

pub use disconnect::DisconnectUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use send_message::SendMessageUseCase;

use crate::{
    domain::{ConnectionId, Member},
    infrastructure::dto::websocket::{RoomUser, ServerEvent},
};

/// Display name reserved for server-generated system notices.
pub const SYSTEM_USERNAME: &str = "system";

/// One outbound event addressed to one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    /// Connection the event is addressed to
    pub target: ConnectionId,
    /// The event to deliver
    pub event: ServerEvent,
}

/// Build a system notice addressed to `target`.
pub(crate) fn system_notice(target: ConnectionId, message: String, sent_at: i64) -> Outbound {
    Outbound {
        target,
        event: ServerEvent::ReceiveMessage {
            message,
            username: SYSTEM_USERNAME.to_string(),
            sent_at,
        },
    }
}

/// Build a presence snapshot of `members` addressed to `target`.
pub(crate) fn presence_snapshot(target: ConnectionId, members: &[Member]) -> Outbound {
    Outbound {
        target,
        event: ServerEvent::ChatroomUsers {
            users: members
                .iter()
                .map(|m| RoomUser {
                    id: m.id.as_str().to_string(),
                    username: m.username.as_str().to_string(),
                })
                .collect(),
        },
    }
}
