//! UseCase: メッセージ送信処理
//!
//! 送信者の所属ルームは必ず Registry から引く。ペイロードに載ってくる
//! ルーム名は信用せず、所属していなければ送信者本人にだけエラー通知を
//! 返して破棄する（他のメンバーには何も届かない）。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者を含むルーム全員へのファンアウトと、非メンバーの扱い
//!
//! ### なぜこのテストが必要か
//! - ルーム外の接続へメッセージが漏れないことを保証
//! - 履歴ストアの失敗がライブ配信へ波及しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーによる送信とファンアウト
//! - 異常系：どのルームにも参加していない接続からの送信
//! - 異常系：履歴ストアの保存失敗（配信は継続）

use std::sync::Arc;

use staychat_shared::time::now_pht_timestamp;

use crate::{
    domain::{
        ChatMessage, ConnectionId, HistoryStore, MessageBody, RoomName, RoomRegistry, Timestamp,
        Username,
    },
    infrastructure::dto::websocket::ServerEvent,
};

use super::{Outbound, system_notice};

/// 送信者がどのルームにも参加していないときのエラー通知
const NOT_IN_ROOM_NOTICE: &str =
    "You are not in a chat room. Join a room before sending messages.";

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Registry（プレゼンスの唯一の正)
    registry: Arc<dyn RoomRegistry>,
    /// 履歴ストア（外部コラボレータ。失敗しても配信は続行）
    history: Arc<dyn HistoryStore>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, history: Arc<dyn HistoryStore>) -> Self {
        Self { registry, history }
    }

    /// メッセージ送信を実行し、配送プランを返す
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信元接続の ID
    /// * `username` - ペイロードの表示名（そのまま配送される）
    /// * `claimed_room` - ペイロードのルーム名（配送には使わない）
    /// * `body` - メッセージ本文
    /// * `sent_at` - ペイロードのタイムスタンプ（そのまま配送される）
    ///
    /// # Returns
    ///
    /// 送信者を含む現在のルーム全メンバー宛の配送プラン。非メンバー
    /// からの送信では送信者宛のエラー通知1件のみ。
    pub async fn execute(
        &self,
        sender: ConnectionId,
        username: Username,
        claimed_room: RoomName,
        body: MessageBody,
        sent_at: Timestamp,
    ) -> Vec<Outbound> {
        // 1. 所属ルームとメンバー一覧を Registry から原子的に読む
        let Some((current_room, members)) = self.registry.current_membership(&sender).await
        else {
            tracing::warn!(
                "Dropping message from '{}' ({}): not in any room",
                username,
                sender
            );
            return vec![system_notice(
                sender,
                NOT_IN_ROOM_NOTICE.to_string(),
                now_pht_timestamp(),
            )];
        };

        if claimed_room != current_room {
            tracing::debug!(
                "Payload room '{}' differs from registered room '{}' for '{}'",
                claimed_room,
                current_room,
                sender
            );
        }

        // 2. 履歴ストアへの転送は fire-and-forget
        let message = ChatMessage::new(current_room, username.clone(), body.clone(), sent_at);
        let history = Arc::clone(&self.history);
        tokio::spawn(async move {
            if let Err(e) = history.save(message).await {
                tracing::warn!("Failed to save message to history store: {}", e);
            }
        });

        // 3. 送信者を含む全メンバーへ、供給されたフィールドをそのまま配送
        let event = ServerEvent::ReceiveMessage {
            message: body.into_string(),
            username: username.into_string(),
            sent_at: sent_at.value(),
        };
        members
            .into_iter()
            .map(|m| Outbound {
                target: m.id,
                event: event.clone(),
            })
            .collect()
    }
}
