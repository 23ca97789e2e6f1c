//! InMemory Hub Repository 実装
//!
//! ドメイン層が定義する HubRepository trait の具体的な実装。
//! 接続レジストリとグループメンバーシップを1つの Mutex で保護します。
//! 両者を同じロックで扱うため、ロック順序の問題は発生しません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, GroupId, GroupMembership, HubRepository,
    MembershipChange, PresenceEntry, UserId,
};

/// Live hub state guarded by [`InMemoryHubRepository`]
#[derive(Debug, Default)]
pub struct HubState {
    pub registry: ConnectionRegistry,
    pub membership: GroupMembership,
}

/// インメモリ Hub Repository 実装
pub struct InMemoryHubRepository {
    state: Arc<Mutex<HubState>>,
}

impl InMemoryHubRepository {
    /// 新しい InMemoryHubRepository を作成
    pub fn new(state: Arc<Mutex<HubState>>) -> Self {
        Self { state }
    }
}

impl Default for InMemoryHubRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HubState::default())))
    }
}

#[async_trait]
impl HubRepository for InMemoryHubRepository {
    async fn register_connection(&self, connection: Connection) {
        let mut state = self.state.lock().await;
        state.registry.register(connection);
    }

    async fn remove_connection(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let mut state = self.state.lock().await;
        state.registry.remove(connection_id)
    }

    async fn get_connection(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let state = self.state.lock().await;
        state.registry.get(connection_id).cloned()
    }

    async fn presence_with_targets(&self) -> (Vec<PresenceEntry>, Vec<ConnectionId>) {
        let state = self.state.lock().await;
        (state.registry.snapshot(), state.registry.connection_ids())
    }

    async fn connections_of_user(&self, user_id: &UserId) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state.registry.connections_of_user(user_id)
    }

    async fn presence_snapshot(&self) -> Vec<PresenceEntry> {
        let state = self.state.lock().await;
        state.registry.snapshot()
    }

    async fn join_group(&self, group: GroupId, connection_id: ConnectionId) -> MembershipChange {
        let mut state = self.state.lock().await;
        state.membership.join(group, connection_id)
    }

    async fn leave_group(
        &self,
        group: &GroupId,
        connection_id: &ConnectionId,
    ) -> Option<MembershipChange> {
        let mut state = self.state.lock().await;
        state.membership.leave(group, connection_id)
    }

    async fn leave_all_groups(&self, connection_id: &ConnectionId) -> Vec<MembershipChange> {
        let mut state = self.state.lock().await;
        state.membership.remove_everywhere(connection_id)
    }

    async fn group_members(&self, group: &GroupId) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state.membership.members(group)
    }

    async fn group_member_connections(&self, group: &GroupId) -> Vec<Connection> {
        let state = self.state.lock().await;
        state
            .membership
            .members(group)
            .iter()
            .filter_map(|id| state.registry.get(id).cloned())
            .collect()
    }

    async fn count_connections(&self) -> usize {
        let state = self.state.lock().await;
        state.registry.len()
    }

    async fn count_groups(&self) -> usize {
        let state = self.state.lock().await;
        state.membership.group_count()
    }
}
