//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{GroupId, GroupKind},
    infrastructure::dto::{
        http::{ErrorBodyDto, GroupDetailDto, GroupMemberDto, HealthDto, HubStatsDto},
        websocket::OnlineUserDto,
    },
    ui::state::AppState,
};
use boardcast_shared::time::now_rfc3339;

type ApiError = (StatusCode, Json<ErrorBodyDto>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorBodyDto::new(message)))
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        timestamp: now_rfc3339(),
    })
}

/// Current presence snapshot
pub async fn get_online_users(State(state): State<Arc<AppState>>) -> Json<Vec<OnlineUserDto>> {
    let users = state.get_hub_state_usecase.online_users().await;
    Json(users.into_iter().map(OnlineUserDto::from).collect())
}

/// Members of one board or chat room; unknown rooms are empty
pub async fn get_group_detail(
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<GroupDetailDto>, ApiError> {
    let kind: GroupKind = kind.parse().map_err(|e| bad_request(format!("{e}")))?;
    let group = GroupId::new(kind, id).map_err(|e| bad_request(format!("{e}")))?;

    let members: Vec<GroupMemberDto> = state
        .get_hub_state_usecase
        .group_members(&group)
        .await
        .iter()
        .map(GroupMemberDto::from)
        .collect();

    Ok(Json(GroupDetailDto {
        kind: group.kind().as_str().to_string(),
        id: group.key().to_string(),
        member_count: members.len(),
        members,
    }))
}

/// Debug endpoint with live counters (for testing purposes)
pub async fn debug_hub_state(State(state): State<Arc<AppState>>) -> Json<HubStatsDto> {
    let stats = state.get_hub_state_usecase.stats().await;
    Json(HubStatsDto {
        connections: stats.connections,
        groups: stats.groups,
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    (StatusCode::NOT_FOUND, Json(ErrorBodyDto::new("Not Found")))
}
