//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectConnectionUseCase, DisconnectConnectionUseCase, GetHubStateUseCase, JoinGroupUseCase,
    LeaveGroupUseCase, RouteEventUseCase, SendNotificationUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_connection_usecase: Arc<ConnectConnectionUseCase>,
    pub disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
    pub join_group_usecase: Arc<JoinGroupUseCase>,
    pub leave_group_usecase: Arc<LeaveGroupUseCase>,
    pub route_event_usecase: Arc<RouteEventUseCase>,
    pub send_notification_usecase: Arc<SendNotificationUseCase>,
    pub get_hub_state_usecase: Arc<GetHubStateUseCase>,
}
