//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Group key (board id / channel id) is empty
    #[error("Group key must not be empty")]
    EmptyGroupKey,

    /// Group kind is neither `board` nor `chat`
    #[error("Unknown group kind '{0}'")]
    UnknownGroupKind(String),
}

/// Errors raised while pushing an event to a connection
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// The event could not be encoded for the wire
    #[error("Failed to encode event: {0}")]
    EncodeFailed(String),
}
