//! UseCase: グループ退出処理

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, GroupId, HubEvent, HubRepository, MembershipChange, MessagePusher,
    UserId,
};

/// グループ退出のユースケース
pub struct LeaveGroupUseCase {
    repository: Arc<dyn HubRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveGroupUseCase {
    pub fn new(repository: Arc<dyn HubRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Leave `group` and tell the remaining members.
    ///
    /// Returns `None` (and notifies nobody) if the connection was not a member.
    pub async fn execute(
        &self,
        group: &GroupId,
        connection_id: &ConnectionId,
    ) -> Option<MembershipChange> {
        let change = self.repository.leave_group(group, connection_id).await?;

        let (user_id, display_name) = match self.repository.get_connection(connection_id).await {
            Some(connection) => (connection.user_id, connection.display_name),
            None => (UserId::anonymous(), DisplayName::default()),
        };
        tracing::info!(
            "User {} ({}) left {}",
            display_name.as_str(),
            user_id.as_str(),
            change.group
        );

        let event = HubEvent::MemberLeft {
            group: change.group.clone(),
            user_id,
            display_name,
        };
        if let Err(e) = self
            .message_pusher
            .broadcast(change.notify.clone(), &event)
            .await
        {
            tracing::warn!("Failed to announce departure from {}: {}", change.group, e);
        }

        Some(change)
    }
}
