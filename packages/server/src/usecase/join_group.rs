//! UseCase: グループ参加処理

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, GroupId, HubEvent, HubRepository, MembershipChange, MessagePusher,
    UserId,
};

/// グループ参加のユースケース
pub struct JoinGroupUseCase {
    repository: Arc<dyn HubRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinGroupUseCase {
    pub fn new(repository: Arc<dyn HubRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Join `group` and announce it to the other members.
    pub async fn execute(&self, group: GroupId, connection_id: ConnectionId) -> MembershipChange {
        let (user_id, display_name) = match self.repository.get_connection(&connection_id).await {
            Some(connection) => (connection.user_id, connection.display_name),
            None => (UserId::anonymous(), DisplayName::default()),
        };

        let change = self.repository.join_group(group, connection_id).await;
        tracing::info!(
            "User {} ({}) joined {}",
            display_name.as_str(),
            user_id.as_str(),
            change.group
        );

        let event = HubEvent::MemberJoined {
            group: change.group.clone(),
            user_id,
            display_name,
        };
        if let Err(e) = self
            .message_pusher
            .broadcast(change.notify.clone(), &event)
            .await
        {
            tracing::warn!("Failed to announce join of {}: {}", change.group, e);
        }

        change
    }
}
