//! Repository trait 定義
//!
//! ドメイン層が必要とするハブ状態（接続レジストリとグループメンバーシップ）への
//! インターフェースを定義します。具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;

use super::{
    entity::{Connection, PresenceEntry},
    membership::MembershipChange,
    value_object::{ConnectionId, GroupId, UserId},
};

/// Hub Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
/// Every method is applied atomically with respect to the others.
#[async_trait]
pub trait HubRepository: Send + Sync {
    /// 接続を登録（同じ ID の古いエントリは上書き）
    async fn register_connection(&self, connection: Connection);

    /// 接続を削除（存在しない場合は何もしない）
    async fn remove_connection(&self, connection_id: &ConnectionId) -> Option<Connection>;

    async fn get_connection(&self, connection_id: &ConnectionId) -> Option<Connection>;

    /// プレゼンスのスナップショットと配信先の接続 ID を同じ時点で取得
    async fn presence_with_targets(&self) -> (Vec<PresenceEntry>, Vec<ConnectionId>);

    /// 指定ユーザーの全ての接続 ID を取得
    async fn connections_of_user(&self, user_id: &UserId) -> Vec<ConnectionId>;

    /// プレゼンスのスナップショットを取得
    async fn presence_snapshot(&self) -> Vec<PresenceEntry>;

    /// グループに参加
    async fn join_group(&self, group: GroupId, connection_id: ConnectionId) -> MembershipChange;

    /// グループから退出（メンバーでなければ `None`）
    async fn leave_group(
        &self,
        group: &GroupId,
        connection_id: &ConnectionId,
    ) -> Option<MembershipChange>;

    /// 全てのグループから退出
    async fn leave_all_groups(&self, connection_id: &ConnectionId) -> Vec<MembershipChange>;

    /// グループのメンバーを取得（未知のグループは空）
    async fn group_members(&self, group: &GroupId) -> Vec<ConnectionId>;

    /// グループのメンバーを接続情報付きで取得
    async fn group_member_connections(&self, group: &GroupId) -> Vec<Connection>;

    async fn count_connections(&self) -> usize;

    async fn count_groups(&self) -> usize;
}
