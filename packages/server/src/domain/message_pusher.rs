//! MessagePusher trait 定義
//!
//! 接続中のクライアントへイベントを届けるためのインターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, event::HubEvent, value_object::ConnectionId};

/// Outbound channel of one connection (encoded frames)
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivery side of the hub.
///
/// Per connection, events are delivered in the order they were pushed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 複数の接続にイベントを送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &HubEvent,
    ) -> Result<(), MessagePushError>;
}
