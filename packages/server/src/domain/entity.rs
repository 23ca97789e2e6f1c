//! Entities of the fan-out hub.

use serde::Serialize;

use super::value_object::{ConnectionId, DisplayName, Timestamp, UserId};

/// One live session and the identity it presented at handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub user_id: UserId,
    pub display_name: DisplayName,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        user_id: UserId,
        display_name: DisplayName,
        connected_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            display_name,
            connected_at,
        }
    }

    /// Presence entry for this connection
    pub fn presence(&self) -> PresenceEntry {
        PresenceEntry {
            user_id: self.user_id.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// One element of the presence snapshot.
///
/// Two connections of the same user yield two entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceEntry {
    pub user_id: UserId,
    pub display_name: DisplayName,
}
