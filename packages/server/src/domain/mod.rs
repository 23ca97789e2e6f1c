//! Domain layer: value objects, entities and the in-memory hub models.
//!
//! The registry and membership models are plain data structures with no I/O;
//! the traits in `repository` and `message_pusher` are implemented by the
//! infrastructure layer (dependency inversion).

pub mod command;
pub mod entity;
pub mod error;
pub mod event;
pub mod membership;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use command::{HubCommand, NotificationTarget};
pub use entity::{Connection, PresenceEntry};
pub use error::{MessagePushError, ValueObjectError};
pub use event::{DomainEvent, HubEvent};
pub use membership::{GroupMembership, MembershipChange};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::ConnectionRegistry;
pub use repository::HubRepository;
pub use value_object::{ConnectionId, DisplayName, GroupId, GroupKind, Timestamp, UserId};
