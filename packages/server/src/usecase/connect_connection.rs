//! UseCase: 接続処理
//!
//! ハンドシェイク時に接続をレジストリへ登録し、プレゼンスを配信します。
//! userId が無い接続も匿名ユーザーとして受け付けます。

use std::sync::Arc;

use boardcast_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionId, DisplayName, HubRepository, MessagePusher, PusherChannel, Timestamp,
    UserId,
};

use super::publish_presence::PresenceBroadcaster;

/// 接続のユースケース
pub struct ConnectConnectionUseCase {
    repository: Arc<dyn HubRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<PresenceBroadcaster>,
    clock: Arc<dyn Clock>,
}

impl ConnectConnectionUseCase {
    pub fn new(
        repository: Arc<dyn HubRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        presence: Arc<PresenceBroadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            presence,
            clock,
        }
    }

    /// 接続を登録する
    ///
    /// # Arguments
    ///
    /// * `user_id` - ハンドシェイクで渡されたユーザー ID（空なら匿名）
    /// * `display_name` - 表示名
    /// * `sender` - この接続へのイベント送信用チャンネル
    ///
    /// # Returns
    ///
    /// 新しく発行された接続
    pub async fn execute(
        &self,
        user_id: UserId,
        display_name: DisplayName,
        sender: PusherChannel,
    ) -> Connection {
        let connection = Connection::new(
            ConnectionId::generate(),
            user_id,
            display_name,
            Timestamp::new(self.clock.now_millis()),
        );

        // The sender is registered first so the new connection receives its own presence update.
        self.message_pusher
            .register_client(connection.id, sender)
            .await;
        self.repository.register_connection(connection.clone()).await;

        tracing::info!(
            "User connected: {} ({}) as '{}'",
            connection.display_name.as_str(),
            connection.user_id.as_str(),
            connection.id
        );

        self.presence.request_publish().await;

        connection
    }
}
