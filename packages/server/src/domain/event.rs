//! Events emitted by the hub, before wire encoding.

use serde_json::Value;

use super::{
    entity::PresenceEntry,
    value_object::{DisplayName, GroupId, UserId},
};

/// Application-level mutation relayed by the hub.
///
/// The payload is opaque: it is forwarded unmodified under `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvent {
    pub name: String,
    pub payload: Value,
}

impl DomainEvent {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Outbound event delivered to connections.
#[derive(Debug, Clone, PartialEq)]
pub enum HubEvent {
    /// Global presence snapshot
    OnlineUsers(Vec<PresenceEntry>),
    MemberJoined {
        group: GroupId,
        user_id: UserId,
        display_name: DisplayName,
    },
    MemberLeft {
        group: GroupId,
        user_id: UserId,
        display_name: DisplayName,
    },
    TypingStarted {
        channel: GroupId,
        user_id: UserId,
        display_name: DisplayName,
    },
    TypingStopped {
        channel: GroupId,
        user_id: UserId,
        display_name: DisplayName,
    },
    /// Relay of a domain event (task/column mutation, chat message, notification)
    Relay(DomainEvent),
}

impl HubEvent {
    /// Event name on the wire
    pub fn name(&self) -> &str {
        use super::value_object::GroupKind;

        match self {
            HubEvent::OnlineUsers(_) => "online-users",
            HubEvent::MemberJoined { group, .. } => match group.kind() {
                GroupKind::Board => "user-joined-board",
                GroupKind::Chat => "user-joined-chat",
            },
            HubEvent::MemberLeft { group, .. } => match group.kind() {
                GroupKind::Board => "user-left-board",
                GroupKind::Chat => "user-left-chat",
            },
            HubEvent::TypingStarted { .. } => "user-typing",
            HubEvent::TypingStopped { .. } => "user-stopped-typing",
            HubEvent::Relay(event) => &event.name,
        }
    }
}
