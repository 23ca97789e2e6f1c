//! Connection registry: live connection -> user identity.

use std::collections::HashMap;

use super::{
    entity::{Connection, PresenceEntry},
    value_object::{ConnectionId, UserId},
};

#[derive(Debug, Clone)]
struct RegisteredConnection {
    /// Registration order, used to keep snapshots stable
    seq: u64,
    connection: Connection,
}

/// Registry of every live connection.
///
/// A connection is present here from handshake until disconnect, and the
/// presence snapshot is derived from this map only.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, RegisteredConnection>,
    next_seq: u64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a connection, replacing any stale entry with the same id.
    pub fn register(&mut self, connection: Connection) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.connections
            .insert(connection.id, RegisteredConnection { seq, connection });
    }

    /// Remove a connection. Unknown ids are ignored.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(id).map(|entry| entry.connection)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id).map(|entry| &entry.connection)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// All live connections in registration order.
    pub fn connections(&self) -> Vec<&Connection> {
        let mut entries: Vec<&RegisteredConnection> = self.connections.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries.into_iter().map(|entry| &entry.connection).collect()
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.connections().into_iter().map(|c| c.id).collect()
    }

    /// Presence snapshot: one entry per live connection, no deduplication.
    pub fn snapshot(&self) -> Vec<PresenceEntry> {
        self.connections()
            .into_iter()
            .map(Connection::presence)
            .collect()
    }

    /// Connections opened by the given user (one per tab/device).
    pub fn connections_of_user(&self, user_id: &UserId) -> Vec<ConnectionId> {
        self.connections()
            .into_iter()
            .filter(|c| &c.user_id == user_id)
            .map(|c| c.id)
            .collect()
    }
}
