//! UseCase layer: one use case per hub operation.

mod connect_connection;
mod disconnect_connection;
mod get_hub_state;
mod join_group;
mod leave_group;
mod publish_presence;
mod route_event;
mod send_notification;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_connection::ConnectConnectionUseCase;
pub use disconnect_connection::DisconnectConnectionUseCase;
pub use get_hub_state::{GetHubStateUseCase, HubStats};
pub use join_group::JoinGroupUseCase;
pub use leave_group::LeaveGroupUseCase;
pub use publish_presence::{PresenceBroadcaster, PublishPresenceUseCase};
pub use route_event::RouteEventUseCase;
pub use send_notification::SendNotificationUseCase;
