//! Real-time fan-out layer for the Boardcast kanban/chat application.
//!
//! Tracks live connections and who is online, keeps board and chat room
//! memberships, and relays mutation events to the members of the relevant
//! room over WebSocket. All state is in memory and rebuilt empty on restart.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod app;
pub mod config;
