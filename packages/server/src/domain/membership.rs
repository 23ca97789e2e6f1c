//! Group membership tracker: board/chat rooms -> subscribed connections.
//!
//! Keeps a reverse index (connection -> groups) so that disconnect cleanup
//! only touches the groups the connection actually belongs to.

use std::collections::{BTreeSet, HashMap};

use super::value_object::{ConnectionId, GroupId};

/// Result of a join or leave: the group and the members to notify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipChange {
    pub group: GroupId,
    /// Current members of the group other than the connection that changed
    pub notify: Vec<ConnectionId>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupMembership {
    groups: HashMap<GroupId, BTreeSet<ConnectionId>>,
    memberships: HashMap<ConnectionId, BTreeSet<GroupId>>,
}

impl GroupMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `connection` to `group`, creating the group on first join.
    ///
    /// Re-joining keeps the membership unchanged but still reports the other
    /// members so they can be notified again.
    pub fn join(&mut self, group: GroupId, connection: ConnectionId) -> MembershipChange {
        let members = self.groups.entry(group.clone()).or_default();
        members.insert(connection);
        let notify = members
            .iter()
            .copied()
            .filter(|id| *id != connection)
            .collect();

        self.memberships
            .entry(connection)
            .or_default()
            .insert(group.clone());

        MembershipChange { group, notify }
    }

    /// Remove `connection` from `group`.
    ///
    /// Returns `None` when the connection was not a member.
    pub fn leave(&mut self, group: &GroupId, connection: &ConnectionId) -> Option<MembershipChange> {
        let members = self.groups.get_mut(group)?;
        if !members.remove(connection) {
            return None;
        }
        let notify = members.iter().copied().collect();
        if members.is_empty() {
            self.groups.remove(group);
        }

        if let Some(groups) = self.memberships.get_mut(connection) {
            groups.remove(group);
            if groups.is_empty() {
                self.memberships.remove(connection);
            }
        }

        Some(MembershipChange {
            group: group.clone(),
            notify,
        })
    }

    /// Remove `connection` from every group it belongs to.
    ///
    /// One change is returned per group left, ordered by group id.
    pub fn remove_everywhere(&mut self, connection: &ConnectionId) -> Vec<MembershipChange> {
        let Some(groups) = self.memberships.remove(connection) else {
            return Vec::new();
        };

        groups
            .into_iter()
            .filter_map(|group| {
                let members = self.groups.get_mut(&group)?;
                members.remove(connection);
                let notify = members.iter().copied().collect();
                if members.is_empty() {
                    self.groups.remove(&group);
                }
                Some(MembershipChange { group, notify })
            })
            .collect()
    }

    /// Members of `group`; empty for unknown groups.
    pub fn members(&self, group: &GroupId) -> Vec<ConnectionId> {
        self.groups
            .get(group)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of non-empty groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
