//! UseCase: イベントのルーティング
//!
//! グループのメンバーにイベントを配信します（fire-and-forget）。
//! 同じ接続から発行されたイベントは、受信した順に処理されるため
//! グループ内の受信者には発行順で届きます。

use std::sync::Arc;

use crate::domain::{ConnectionId, GroupId, HubEvent, HubRepository, MessagePusher};

/// イベントルーティングのユースケース
pub struct RouteEventUseCase {
    repository: Arc<dyn HubRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RouteEventUseCase {
    pub fn new(repository: Arc<dyn HubRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Deliver `event` to every member of `group`.
    ///
    /// With `exclude_source` the source connection is skipped. Delivery
    /// failures are logged and dropped.
    ///
    /// # Returns
    ///
    /// The connections the event was handed to
    pub async fn execute(
        &self,
        group: &GroupId,
        event: &HubEvent,
        source: &ConnectionId,
        exclude_source: bool,
    ) -> Vec<ConnectionId> {
        let targets: Vec<ConnectionId> = self
            .repository
            .group_members(group)
            .await
            .into_iter()
            .filter(|id| !(exclude_source && id == source))
            .collect();

        if targets.is_empty() {
            tracing::debug!("No recipients for '{}' in {}", event.name(), group);
            return targets;
        }

        if let Err(e) = self
            .message_pusher
            .broadcast(targets.clone(), event)
            .await
        {
            tracing::warn!("Failed to route '{}' to {}: {}", event.name(), group, e);
        }
        tracing::debug!(
            "Routed '{}' from '{}' to {} member(s) of {}",
            event.name(),
            source,
            targets.len(),
            group
        );

        targets
    }
}
