//! Utilities shared by the Boardcast binaries and their tests.

pub mod logger;
pub mod time;
