//! Dependency wiring for the server.

use std::sync::Arc;

use boardcast_shared::time::{Clock, SystemClock};

use crate::{
    config::ServerConfig,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryHubRepository},
    ui::{Server, state::AppState},
    usecase::{
        ConnectConnectionUseCase, DisconnectConnectionUseCase, GetHubStateUseCase,
        JoinGroupUseCase, LeaveGroupUseCase, PresenceBroadcaster, PublishPresenceUseCase,
        RouteEventUseCase, SendNotificationUseCase,
    },
};

/// Build a server backed by in-memory state and the system clock.
pub fn build_server(config: ServerConfig) -> Server {
    build_server_with_clock(config, Arc::new(SystemClock))
}

/// Build a server backed by in-memory state.
///
/// Each call creates independent state; nothing is shared between servers.
pub fn build_server_with_clock(config: ServerConfig, clock: Arc<dyn Clock>) -> Server {
    // 1. Repository (in-memory hub state)
    let repository = Arc::new(InMemoryHubRepository::default());

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Presence
    let publish_presence = Arc::new(PublishPresenceUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let presence = Arc::new(PresenceBroadcaster::new(
        publish_presence,
        config.presence_debounce,
    ));

    // 4. UseCases
    let route_event_usecase = Arc::new(RouteEventUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let state = AppState {
        connect_connection_usecase: Arc::new(ConnectConnectionUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            presence.clone(),
            clock,
        )),
        disconnect_connection_usecase: Arc::new(DisconnectConnectionUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            presence.clone(),
        )),
        join_group_usecase: Arc::new(JoinGroupUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        )),
        leave_group_usecase: Arc::new(LeaveGroupUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        )),
        send_notification_usecase: Arc::new(SendNotificationUseCase::new(
            repository.clone(),
            message_pusher,
            route_event_usecase.clone(),
        )),
        route_event_usecase,
        get_hub_state_usecase: Arc::new(GetHubStateUseCase::new(repository)),
    };

    // 5. Server
    Server::new(config, state, presence)
}
