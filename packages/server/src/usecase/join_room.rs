//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルーム参加と、それに伴う通知・スナップショットの配送プラン構築
//!
//! ### なぜこのテストが必要か
//! - 参加者本人には歓迎通知、他のメンバーには参加通知が届くことを保証
//! - 別ルームからの移動時に、元のルームが離脱通知を受け取ることを確認
//! - スナップショットが変更適用後のメンバー構成を映すことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの初参加、既存ルームへの参加
//! - エッジケース：別ルームに所属したままの参加（暗黙的な離脱）

use std::sync::Arc;

use staychat_shared::time::now_pht_timestamp;

use crate::domain::{ConnectionId, Member, RoomName, RoomRegistry, Username};

use super::{Outbound, presence_snapshot, system_notice};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（プレゼンスの唯一の正）
    registry: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム参加を実行し、配送プランを返す
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `username` - 参加時に名乗る表示名
    /// * `room` - 参加先のルーム名
    ///
    /// # Returns
    ///
    /// 配送プラン。移動元ルームへの離脱通知とスナップショット、
    /// 本人への歓迎通知、他メンバーへの参加通知、参加先ルームへの
    /// スナップショットの順。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        username: Username,
        room: RoomName,
    ) -> Vec<Outbound> {
        let member = Member::new(connection_id.clone(), username.clone());
        let outcome = self.registry.join(member, room.clone()).await;
        let now = now_pht_timestamp();
        let mut plan = Vec::new();

        // 1. 別ルームから移動してきた場合、元のルームへ離脱通知と
        //    更新後スナップショットを届ける
        if let Some(departure) = outcome.departed {
            let left_text = format!("{} has left the chat room", departure.member.username);
            for m in &departure.remaining {
                plan.push(system_notice(m.id.clone(), left_text.clone(), now));
            }
            for m in &departure.remaining {
                plan.push(presence_snapshot(m.id.clone(), &departure.remaining));
            }
        }

        // 2. 本人への歓迎通知
        plan.push(system_notice(
            connection_id.clone(),
            format!("Welcome to {room}, {username}!"),
            now,
        ));

        // 3. 既存メンバーへの参加通知（本人は除く）
        let joined_text = format!("{username} has joined the chat room");
        for m in outcome.members.iter().filter(|m| m.id != connection_id) {
            plan.push(system_notice(m.id.clone(), joined_text.clone(), now));
        }

        // 4. 参加先ルームの全メンバーへ、変更適用後のスナップショット
        for m in &outcome.members {
            plan.push(presence_snapshot(m.id.clone(), &outcome.members));
        }

        plan
    }
}
