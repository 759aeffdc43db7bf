//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリの台帳として使用します。
//!
//! ## 同時実行について
//!
//! ルーム表（room name → Room）と接続インデックス（connection id →
//! room name）を単一の Mutex で保護します。join / leave は同じ
//! クリティカルセクション内で両方を更新するため、2つのビューが
//! 食い違うことはなく、同じルーム・同じ接続に対する変更が
//! 交錯することもありません。スナップショット読み取りも同じ
//! ロックを取るので、変更途中のメンバー集合が観測されることは
//! ありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Departure, JoinOutcome, Member, Room, RoomName, RoomRegistry,
};

#[derive(Default)]
struct RegistryInner {
    /// ルーム台帳（空になったルームはエントリごと削除される）
    rooms: HashMap<RoomName, Room>,
    /// 接続 ID → 所属ルーム名のインデックス
    ///
    /// 切断時のクリーンアップはこのインデックスの lookup-and-remove
    /// だけで済む。キーが無ければ「既にクリーンアップ済み」。
    memberships: HashMap<ConnectionId, RoomName>,
}

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRegistry {
    inner: Mutex<RegistryInner>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner::default()),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort a member snapshot by display name (ties broken by connection id)
/// for consistent ordering.
fn sorted_members(room: &Room) -> Vec<Member> {
    let mut members = room.members.clone();
    members.sort_by(|a, b| {
        a.username
            .as_str()
            .cmp(b.username.as_str())
            .then_with(|| a.id.as_str().cmp(b.id.as_str()))
    });
    members
}

impl RegistryInner {
    /// 接続を現在のルームから外す。所属が無ければ None。
    fn remove_membership(&mut self, connection_id: &ConnectionId) -> Option<Departure> {
        let room_name = self.memberships.remove(connection_id)?;
        let room = self.rooms.get_mut(&room_name)?;
        let member = room.remove_member(connection_id)?;
        let remaining = sorted_members(room);
        if room.is_empty() {
            self.rooms.remove(&room_name);
        }
        Some(Departure {
            room: room_name,
            member,
            remaining,
        })
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, member: Member, room: RoomName) -> JoinOutcome {
        let mut inner = self.inner.lock().await;

        // 1. 別ルームに所属していれば同一クリティカルセクション内で先に外す
        //    （同じルームへの再参加は表示名の更新のみで、離脱扱いにしない）
        let in_other_room = inner
            .memberships
            .get(&member.id)
            .is_some_and(|current| current != &room);
        let departed = if in_other_room {
            inner.remove_membership(&member.id)
        } else {
            None
        };

        // 2. インデックスとルーム台帳の両方へ登録
        inner
            .memberships
            .insert(member.id.clone(), room.clone());
        let entry = inner
            .rooms
            .entry(room.clone())
            .or_insert_with(|| Room::new(room));
        entry.upsert_member(member);

        let members = sorted_members(entry);
        JoinOutcome { departed, members }
    }

    async fn leave(&self, connection_id: &ConnectionId) -> Option<Departure> {
        let mut inner = self.inner.lock().await;
        inner.remove_membership(connection_id)
    }

    async fn members_of(&self, room: &RoomName) -> Vec<Member> {
        let inner = self.inner.lock().await;
        inner
            .rooms
            .get(room)
            .map(sorted_members)
            .unwrap_or_default()
    }

    async fn current_membership(
        &self,
        connection_id: &ConnectionId,
    ) -> Option<(RoomName, Vec<Member>)> {
        let inner = self.inner.lock().await;
        let room_name = inner.memberships.get(connection_id)?;
        let room = inner.rooms.get(room_name)?;
        Some((room_name.clone(), sorted_members(room)))
    }

    async fn room_names(&self) -> Vec<RoomName> {
        let inner = self.inner.lock().await;
        let mut names: Vec<RoomName> = inner.rooms.keys().cloned().collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }
}
