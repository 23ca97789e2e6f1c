//! UseCase: ハブ状態の取得（HTTP API / デバッグ用）

use std::sync::Arc;

use crate::domain::{Connection, GroupId, HubRepository, PresenceEntry};

/// Counts of live connections and non-empty groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubStats {
    pub connections: usize,
    pub groups: usize,
}

pub struct GetHubStateUseCase {
    repository: Arc<dyn HubRepository>,
}

impl GetHubStateUseCase {
    pub fn new(repository: Arc<dyn HubRepository>) -> Self {
        Self { repository }
    }

    pub async fn online_users(&self) -> Vec<PresenceEntry> {
        self.repository.presence_snapshot().await
    }

    /// Members of a group with their identities. Unknown groups are empty.
    pub async fn group_members(&self, group: &GroupId) -> Vec<Connection> {
        self.repository.group_member_connections(group).await
    }

    pub async fn stats(&self) -> HubStats {
        HubStats {
            connections: self.repository.count_connections().await,
            groups: self.repository.count_groups().await,
        }
    }
}
