//! Boardcast real-time fan-out server.
//!
//! Tracks online users and board/chat rooms and relays live updates between clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin boardcast-server
//! cargo run --bin boardcast-server -- --host 0.0.0.0 --port 3001 --presence-debounce-ms 250
//! ```

use std::time::Duration;

use boardcast_server::{
    app::build_server,
    config::{DEFAULT_CLIENT_URL, DEFAULT_HOST, DEFAULT_PORT, ServerConfig},
};
use boardcast_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "boardcast-server")]
#[command(about = "Real-time presence and event fan-out server for Boardcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Origin of the web client allowed by CORS ("*" for any)
    #[arg(long, env = "CLIENT_URL", default_value = DEFAULT_CLIENT_URL)]
    client_url: String,

    /// Coalesce online-users broadcasts over this window (0 publishes on every change)
    #[arg(long, env = "PRESENCE_DEBOUNCE_MS", default_value_t = 0)]
    presence_debounce_ms: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            client_url: args.client_url,
            presence_debounce: Duration::from_millis(args.presence_debounce_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let server = build_server(ServerConfig::from(args));
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
