//! Commands a connection can issue to the hub.

use serde_json::Value;

use super::{
    event::DomainEvent,
    value_object::{GroupId, UserId},
};

/// Destination of a `send-notification`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    /// Every connection of one user
    User(UserId),
    /// Every member of a board room except the sender
    Board(GroupId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HubCommand {
    Join(GroupId),
    Leave(GroupId),
    Relay {
        group: GroupId,
        event: DomainEvent,
        exclude_source: bool,
    },
    Typing {
        channel: GroupId,
        active: bool,
    },
    Notify {
        target: NotificationTarget,
        payload: Value,
    },
}
