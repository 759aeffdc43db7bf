//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 退出に伴う離脱通知とスナップショットの配送プラン構築
//!
//! ### なぜこのテストが必要か
//! - 残ったメンバーにだけ通知が届くことを保証
//! - 未参加の接続の退出が no-op になること（冪等性）を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーの退出と通知
//! - エッジケース：最後のメンバーの退出（通知対象なし）
//! - 冪等性：二重退出、未参加接続の退出

use std::sync::Arc;

use staychat_shared::time::now_pht_timestamp;

use crate::domain::{ConnectionId, RoomRegistry};

use super::{Outbound, presence_snapshot, system_notice};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（プレゼンスの唯一の正）
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム退出を実行し、配送プランを返す
    ///
    /// どのルームにも参加していない接続の退出は no-op で、
    /// 空のプランを返す（エラーにはしない）。
    pub async fn execute(&self, connection_id: ConnectionId) -> Vec<Outbound> {
        let Some(departure) = self.registry.leave(&connection_id).await else {
            return Vec::new();
        };

        let now = now_pht_timestamp();
        let left_text = format!("{} has left the chat room", departure.member.username);
        let mut plan = Vec::new();
        for m in &departure.remaining {
            plan.push(system_notice(m.id.clone(), left_text.clone(), now));
        }
        for m in &departure.remaining {
            plan.push(presence_snapshot(m.id.clone(), &departure.remaining));
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RoomName, Username},
        infrastructure::{dto::websocket::ServerEvent, registry::InMemoryRoomRegistry},
        usecase::JoinRoomUseCase,
    };

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn username(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_leave_notifies_remaining_members() {
        // テスト項目: 退出すると残ったメンバーに離脱通知とスナップショットが届く
        // given (前提条件): alice と bob が lobby に参加済み
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let join = JoinRoomUseCase::new(registry.clone());
        join.execute(conn("c-1"), username("alice"), room("lobby"))
            .await;
        join.execute(conn("c-2"), username("bob"), room("lobby"))
            .await;
        let usecase = LeaveRoomUseCase::new(registry.clone());

        // when (操作): bob が退出
        let plan = usecase.execute(conn("c-2")).await;

        // then (期待する結果): alice 宛の通知とスナップショットのみ
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|o| o.target == conn("c-1")));
        match &plan[0].event {
            ServerEvent::ReceiveMessage { message, .. } => {
                assert_eq!(message, "bob has left the chat room");
            }
            _ => panic!("expected receive_message"),
        }
        match &plan[1].event {
            ServerEvent::ChatroomUsers { users } => {
                assert_eq!(users.len(), 1);
                assert_eq!(users[0].username, "alice");
            }
            _ => panic!("expected chatroom_users"),
        }

        // Registry からも外れている
        assert_eq!(registry.members_of(&room("lobby")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_leave_last_member_produces_empty_plan() {
        // テスト項目: 最後のメンバーの退出では通知対象がいない
        // given (前提条件): alice のみ lobby に参加
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let join = JoinRoomUseCase::new(registry.clone());
        join.execute(conn("c-1"), username("alice"), room("lobby"))
            .await;
        let usecase = LeaveRoomUseCase::new(registry);

        // when (操作):
        let plan = usecase.execute(conn("c-1")).await;

        // then (期待する結果):
        assert!(plan.is_empty());
    }

    #[tokio::test]
    async fn test_leave_without_membership_is_silent() {
        // テスト項目: 未参加の接続の退出は通知もエラーも生まない
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = LeaveRoomUseCase::new(registry);

        // when (操作):
        let plan = usecase.execute(conn("c-9")).await;

        // then (期待する結果):
        assert!(plan.is_empty());
    }

    #[tokio::test]
    async fn test_double_leave_is_idempotent() {
        // テスト項目: 二重退出の2回目は no-op で、通知が二重に出ない
        // given (前提条件): alice と bob が lobby に参加済み、bob が一度退出済み
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let join = JoinRoomUseCase::new(registry.clone());
        join.execute(conn("c-1"), username("alice"), room("lobby"))
            .await;
        join.execute(conn("c-2"), username("bob"), room("lobby"))
            .await;
        let usecase = LeaveRoomUseCase::new(registry);
        let first = usecase.execute(conn("c-2")).await;
        assert!(!first.is_empty());

        // when (操作): もう一度退出
        let second = usecase.execute(conn("c-2")).await;

        // then (期待する結果):
        assert!(second.is_empty());
    }
}
