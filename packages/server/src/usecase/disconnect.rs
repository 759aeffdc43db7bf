//! UseCase: 切断クリーンアップ処理
//!
//! トランスポート切断（明示的な close・転送エラーのどちらでも）ごとに
//! ちょうど1回だけ呼ばれる。切断時点でルームに所属していた場合に限り
//! 切断通知とスナップショットを配送する。既に退出済み・未参加の接続は
//! 何も配送しない。
//!
//! 退出と切断が競合しても、Registry の leave が原子的に所属を検査して
//! 消すため、通知が出るのは高々1回になる。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - 切断通知の exactly-once 性
//!
//! ### なぜこのテストが必要か
//! - 死んだ接続 ID が Registry に残らないことを保証
//! - 明示的な退出後の切断で通知が二重に出ないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム所属中の切断
//! - エッジケース：未参加のままの切断、退出後の切断

use std::sync::Arc;

use staychat_shared::time::now_pht_timestamp;

use crate::domain::{ConnectionId, RoomRegistry};

use super::{Outbound, presence_snapshot, system_notice};

/// 切断クリーンアップのユースケース
pub struct DisconnectUseCase {
    /// Registry（プレゼンスの唯一の正）
    registry: Arc<dyn RoomRegistry>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 切断クリーンアップを実行し、配送プランを返す
    ///
    /// 切断時点でルームに所属していなければ空のプランを返す
    /// （通知は一切出さない）。
    pub async fn execute(&self, connection_id: ConnectionId) -> Vec<Outbound> {
        let Some(departure) = self.registry.leave(&connection_id).await else {
            // 既にクリーンアップ済みか、そもそも参加していない
            return Vec::new();
        };

        tracing::info!(
            "Connection '{}' ('{}') disconnected from room '{}'",
            connection_id,
            departure.member.username,
            departure.room
        );

        let now = now_pht_timestamp();
        let text = format!("{} has disconnected", departure.member.username);
        let mut plan = Vec::new();
        for m in &departure.remaining {
            plan.push(system_notice(m.id.clone(), text.clone(), now));
        }
        for m in &departure.remaining {
            plan.push(presence_snapshot(m.id.clone(), &departure.remaining));
        }
        plan
    }
}
