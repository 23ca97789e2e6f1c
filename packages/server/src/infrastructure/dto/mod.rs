//! Data Transfer Objects (DTOs) for the fan-out server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event frames
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
