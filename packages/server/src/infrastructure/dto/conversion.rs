//! Conversion logic between DTOs and domain types.

use serde_json::Value;

use crate::domain::{
    Connection, DisplayName, DomainEvent, GroupId, GroupKind, HubCommand, HubEvent,
    NotificationTarget, PresenceEntry, UserId,
};
use crate::infrastructure::dto::{
    http::GroupMemberDto,
    websocket::{
        ClientEvent, ClientEventError, MembershipDto, OnlineUserDto, ServerEvent,
        TypingDto,
    },
};
use boardcast_shared::time::timestamp_to_rfc3339;

// ========================================
// DTO → Domain
// ========================================

/// A group id as sent by clients. Numeric ids become their decimal form.
fn group_key(value: &Value) -> Option<String> {
    match value {
        Value::String(key) => Some(key.clone()),
        Value::Number(key) => Some(key.to_string()),
        _ => None,
    }
}

/// Extract a routing key from a relay payload.
fn routing_key(payload: &Value, field: &'static str) -> Result<String, ClientEventError> {
    payload
        .get(field)
        .and_then(group_key)
        .ok_or(ClientEventError::MissingRoutingKey(field))
}

fn bare_key(value: &Value) -> Result<String, ClientEventError> {
    group_key(value).ok_or(ClientEventError::InvalidGroupKey)
}

fn board_relay(name: &str, payload: Value) -> Result<HubCommand, ClientEventError> {
    let group = GroupId::board(routing_key(&payload, "boardId")?)?;
    Ok(HubCommand::Relay {
        group,
        event: DomainEvent::new(name, payload),
        exclude_source: true,
    })
}

fn typing(payload: Value, active: bool) -> Result<HubCommand, ClientEventError> {
    Ok(HubCommand::Typing {
        channel: GroupId::chat(routing_key(&payload, "channelId")?)?,
        active,
    })
}

fn user_id_of(value: Option<&Value>) -> Option<UserId> {
    match value {
        Some(Value::String(id)) if !id.is_empty() => Some(UserId::new(id.clone())),
        Some(Value::Number(id)) => Some(UserId::new(id.to_string())),
        _ => None,
    }
}

impl TryFrom<ClientEvent> for HubCommand {
    type Error = ClientEventError;

    fn try_from(event: ClientEvent) -> Result<Self, Self::Error> {
        match event {
            ClientEvent::JoinBoard(id) => Ok(HubCommand::Join(GroupId::board(bare_key(&id)?)?)),
            ClientEvent::LeaveBoard(id) => Ok(HubCommand::Leave(GroupId::board(bare_key(&id)?)?)),
            ClientEvent::JoinChat(id) => Ok(HubCommand::Join(GroupId::chat(bare_key(&id)?)?)),
            ClientEvent::LeaveChat(id) => Ok(HubCommand::Leave(GroupId::chat(bare_key(&id)?)?)),
            ClientEvent::TaskCreated(payload) => board_relay("task-created", payload),
            ClientEvent::TaskUpdated(payload) => board_relay("task-updated", payload),
            ClientEvent::TaskDeleted(payload) => board_relay("task-deleted", payload),
            ClientEvent::TaskMoved(payload) => board_relay("task-moved", payload),
            ClientEvent::ColumnCreated(payload) => board_relay("column-created", payload),
            ClientEvent::ColumnUpdated(payload) => board_relay("column-updated", payload),
            ClientEvent::ColumnDeleted(payload) => board_relay("column-deleted", payload),
            ClientEvent::SendMessage(payload) => {
                // Chat clients render from the server echo, so the sender is included.
                let group = GroupId::chat(routing_key(&payload, "channelId")?)?;
                Ok(HubCommand::Relay {
                    group,
                    event: DomainEvent::new("new-message", payload),
                    exclude_source: false,
                })
            }
            ClientEvent::TypingStart(payload) => typing(payload, true),
            ClientEvent::TypingStop(payload) => typing(payload, false),
            ClientEvent::SendNotification(payload) => {
                let target = if let Some(user_id) = user_id_of(payload.get("targetUserId")) {
                    NotificationTarget::User(user_id)
                } else if let Ok(board_id) = routing_key(&payload, "boardId") {
                    NotificationTarget::Board(GroupId::board(board_id)?)
                } else {
                    return Err(ClientEventError::MissingNotificationTarget);
                };
                Ok(HubCommand::Notify { target, payload })
            }
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

fn optional_user_id(user_id: &UserId) -> Option<String> {
    (!user_id.is_anonymous()).then(|| user_id.as_str().to_string())
}

impl From<PresenceEntry> for OnlineUserDto {
    fn from(entry: PresenceEntry) -> Self {
        Self {
            id: optional_user_id(&entry.user_id),
            name: entry.display_name.into_string(),
        }
    }
}

impl From<&Connection> for GroupMemberDto {
    fn from(connection: &Connection) -> Self {
        Self {
            connection_id: connection.id.to_string(),
            user_id: optional_user_id(&connection.user_id),
            user_name: connection.display_name.as_str().to_string(),
            connected_at: timestamp_to_rfc3339(connection.connected_at.value()),
        }
    }
}

fn membership_dto(group: &GroupId, user_id: &UserId, display_name: &DisplayName) -> MembershipDto {
    let key = Some(group.key().to_string());
    let (board_id, channel_id) = match group.kind() {
        GroupKind::Board => (key, None),
        GroupKind::Chat => (None, key),
    };
    MembershipDto {
        user_id: optional_user_id(user_id),
        user_name: display_name.as_str().to_string(),
        board_id,
        channel_id,
    }
}

fn typing_dto(channel: &GroupId, user_id: &UserId, display_name: &DisplayName) -> TypingDto {
    TypingDto {
        user_id: optional_user_id(user_id),
        user_name: display_name.as_str().to_string(),
        channel_id: channel.key().to_string(),
    }
}

impl TryFrom<&HubEvent> for ServerEvent {
    type Error = serde_json::Error;

    fn try_from(event: &HubEvent) -> Result<Self, Self::Error> {
        let data = match event {
            HubEvent::OnlineUsers(entries) => serde_json::to_value(
                entries
                    .iter()
                    .cloned()
                    .map(OnlineUserDto::from)
                    .collect::<Vec<_>>(),
            )?,
            HubEvent::MemberJoined {
                group,
                user_id,
                display_name,
            }
            | HubEvent::MemberLeft {
                group,
                user_id,
                display_name,
            } => serde_json::to_value(membership_dto(group, user_id, display_name))?,
            HubEvent::TypingStarted {
                channel,
                user_id,
                display_name,
            }
            | HubEvent::TypingStopped {
                channel,
                user_id,
                display_name,
            } => serde_json::to_value(typing_dto(channel, user_id, display_name))?,
            HubEvent::Relay(domain_event) => domain_event.payload.clone(),
        };

        Ok(Self {
            event: event.name().to_string(),
            data,
        })
    }
}
