//! Value objects of the fan-out hub.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Identifier of one live WebSocket session.
///
/// A reconnect always yields a fresh id; identities are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User identity supplied at handshake. An empty id means anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<Option<String>> for UserId {
    fn from(value: Option<String>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }
}

/// Display name supplied at handshake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<Option<String>> for DisplayName {
    fn from(value: Option<String>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }
}

/// Unix timestamp in milliseconds (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Kind of group a connection can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Board,
    Chat,
}

impl GroupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKind::Board => "board",
            GroupKind::Chat => "chat",
        }
    }
}

impl FromStr for GroupKind {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "board" => Ok(GroupKind::Board),
            "chat" => Ok(GroupKind::Chat),
            other => Err(ValueObjectError::UnknownGroupKind(other.to_string())),
        }
    }
}

/// Group identifier: a board room or a chat room.
///
/// Board and chat keys live in separate namespaces, so `board:general` and
/// `chat:general` are different groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId {
    kind: GroupKind,
    key: String,
}

impl GroupId {
    pub fn new(kind: GroupKind, key: impl Into<String>) -> Result<Self, ValueObjectError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ValueObjectError::EmptyGroupKey);
        }
        Ok(Self { kind, key })
    }

    pub fn board(key: impl Into<String>) -> Result<Self, ValueObjectError> {
        Self::new(GroupKind::Board, key)
    }

    pub fn chat(key: impl Into<String>) -> Result<Self, ValueObjectError> {
        Self::new(GroupKind::Chat, key)
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.key)
    }
}
