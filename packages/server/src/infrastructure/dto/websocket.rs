//! WebSocket event frames.
//!
//! Every frame is a JSON text frame of the form `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::ValueObjectError;

/// Inbound frame sent by a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Board id, as a string or a number
    JoinBoard(Value),
    LeaveBoard(Value),
    /// Channel id, as a string or a number
    JoinChat(Value),
    LeaveChat(Value),
    TaskCreated(Value),
    TaskUpdated(Value),
    TaskDeleted(Value),
    TaskMoved(Value),
    ColumnCreated(Value),
    ColumnUpdated(Value),
    ColumnDeleted(Value),
    SendMessage(Value),
    TypingStart(Value),
    TypingStop(Value),
    SendNotification(Value),
}

impl ClientEvent {
    /// Decode a text frame
    pub fn decode(text: &str) -> Result<Self, ClientEventError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Reasons an inbound frame is dropped
#[derive(Debug, Error)]
pub enum ClientEventError {
    #[error("Malformed event frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Missing routing key '{0}'")]
    MissingRoutingKey(&'static str),

    #[error("Group id must be a string or a number")]
    InvalidGroupKey,

    #[error("Invalid group: {0}")]
    InvalidGroup(#[from] ValueObjectError),

    #[error("Notification has neither 'targetUserId' nor 'boardId'")]
    MissingNotificationTarget,
}

/// Outbound frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEvent {
    pub event: String,
    pub data: Value,
}

impl ServerEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Element of `online-users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineUserDto {
    pub id: Option<String>,
    pub name: String,
}

/// Payload of `user-joined-*` / `user-left-*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipDto {
    pub user_id: Option<String>,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// Payload of `user-typing` / `user-stopped-typing`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingDto {
    pub user_id: Option<String>,
    pub user_name: String,
    pub channel_id: String,
}
