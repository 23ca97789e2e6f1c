//! UseCase: 切断処理
//!
//! 切断時は次の順序で処理します:
//! 1. 所属している全グループから退出し、残りのメンバーに通知
//! 2. レジストリから削除
//! 3. プレゼンスを配信

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, HubEvent, HubRepository, MembershipChange, MessagePusher, UserId,
};

use super::publish_presence::PresenceBroadcaster;

/// 切断のユースケース
pub struct DisconnectConnectionUseCase {
    repository: Arc<dyn HubRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<PresenceBroadcaster>,
}

impl DisconnectConnectionUseCase {
    pub fn new(
        repository: Arc<dyn HubRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        presence: Arc<PresenceBroadcaster>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            presence,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 退出したグループごとの変更（通知対象を含む）。未知の接続の場合は空。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<MembershipChange> {
        let (user_id, display_name) = match self.repository.get_connection(connection_id).await {
            Some(connection) => (connection.user_id, connection.display_name),
            None => (UserId::anonymous(), DisplayName::default()),
        };

        let changes = self.repository.leave_all_groups(connection_id).await;
        for change in &changes {
            let event = HubEvent::MemberLeft {
                group: change.group.clone(),
                user_id: user_id.clone(),
                display_name: display_name.clone(),
            };
            if let Err(e) = self
                .message_pusher
                .broadcast(change.notify.clone(), &event)
                .await
            {
                tracing::warn!("Failed to notify departure from {}: {}", change.group, e);
            }
        }

        let removed = self.repository.remove_connection(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;

        if removed.is_some() {
            tracing::info!(
                "User disconnected: {} ({}) from '{}', left {} group(s)",
                display_name.as_str(),
                user_id.as_str(),
                connection_id,
                changes.len()
            );
            self.presence.request_publish().await;
        }

        changes
    }
}
