//! UseCase: 通知送信
//!
//! - ユーザー宛て: そのユーザーの全ての接続（複数タブ）に配信
//! - ボード宛て: 送信者を除くボードのメンバーに配信

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{
    ConnectionId, DomainEvent, HubEvent, HubRepository, MessagePusher, NotificationTarget,
};

use super::route_event::RouteEventUseCase;

/// 通知送信のユースケース
pub struct SendNotificationUseCase {
    repository: Arc<dyn HubRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    route_event: Arc<RouteEventUseCase>,
}

impl SendNotificationUseCase {
    pub fn new(
        repository: Arc<dyn HubRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        route_event: Arc<RouteEventUseCase>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            route_event,
        }
    }

    /// Deliver a `notification` carrying `payload` unmodified.
    ///
    /// # Returns
    ///
    /// The connections the notification was handed to
    pub async fn execute(
        &self,
        target: NotificationTarget,
        payload: Value,
        source: &ConnectionId,
    ) -> Vec<ConnectionId> {
        let event = HubEvent::Relay(DomainEvent::new("notification", payload));

        match target {
            NotificationTarget::User(user_id) => {
                let targets = self.repository.connections_of_user(&user_id).await;
                if targets.is_empty() {
                    tracing::debug!("User '{}' is offline, notification dropped", user_id.as_str());
                    return targets;
                }
                if let Err(e) = self
                    .message_pusher
                    .broadcast(targets.clone(), &event)
                    .await
                {
                    tracing::warn!("Failed to notify user '{}': {}", user_id.as_str(), e);
                }
                targets
            }
            NotificationTarget::Board(group) => {
                self.route_event.execute(&group, &event, source, true).await
            }
        }
    }
}
