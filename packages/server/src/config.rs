//! Server configuration.

use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed by CORS; `*` allows any origin (without credentials)
    pub client_url: String,
    /// Coalescing window for `online-users`; zero publishes on every change
    pub presence_debounce: Duration,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            client_url: DEFAULT_CLIENT_URL.to_string(),
            presence_debounce: Duration::ZERO,
        }
    }
}
