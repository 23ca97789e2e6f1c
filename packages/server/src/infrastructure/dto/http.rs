//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// RFC 3339 (UTC)
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberDto {
    pub connection_id: String,
    pub user_id: Option<String>,
    pub user_name: String,
    /// RFC 3339 (UTC)
    pub connected_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetailDto {
    pub kind: String,
    pub id: String,
    pub member_count: usize,
    pub members: Vec<GroupMemberDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubStatsDto {
    pub connections: usize,
    pub groups: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessageDto {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBodyDto {
    pub error: ErrorMessageDto,
}

impl ErrorBodyDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorMessageDto {
                message: message.into(),
            },
        }
    }
}
