//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - `HubEvent` を JSON フレームにエンコードして送信（broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、送信に使用します。
//! 送信はノンブロッキングで、切断済みの接続への送信は破棄されます（best-effort）。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, HubEvent, MessagePushError, MessagePusher, PusherChannel},
    infrastructure::dto::websocket::ServerEvent,
};

/// Encode a hub event into a text frame
pub fn encode_event(event: &HubEvent) -> Result<String, MessagePushError> {
    ServerEvent::try_from(event)
        .and_then(|frame| frame.to_json())
        .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
}

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &HubEvent,
    ) -> Result<(), MessagePushError> {
        if targets.is_empty() {
            return Ok(());
        }

        let frame = encode_event(event)?;
        // Sends happen under the lock so that concurrent broadcasts reach every
        // common recipient in the same order.
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                Some(sender) => {
                    if let Err(e) = sender.send(frame.clone()) {
                        tracing::warn!("Failed to push '{}' to '{}': {}", event.name(), target, e);
                    } else {
                        tracing::debug!("Broadcasted '{}' to connection '{}'", event.name(), target);
                    }
                }
                None => {
                    tracing::debug!(
                        "Connection '{}' gone before delivery of '{}', dropping",
                        target,
                        event.name()
                    );
                }
            }
        }

        Ok(())
    }
}
