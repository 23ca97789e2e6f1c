//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, usecase::PresenceBroadcaster};

use super::{
    cors::build_cors_layer,
    handler::{
        http::{debug_hub_state, get_group_detail, get_online_users, health_check, not_found},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket fan-out server
///
/// # Example
///
/// ```ignore
/// let server = boardcast_server::app::build_server(ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
    presence: Arc<PresenceBroadcaster>,
}

impl Server {
    pub fn new(config: ServerConfig, state: AppState, presence: Arc<PresenceBroadcaster>) -> Self {
        Self {
            config,
            state: Arc::new(state),
            presence,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/health", get(health_check))
            .route("/api/online-users", get(get_online_users))
            .route("/api/groups/{kind}/{id}", get(get_group_detail))
            .route("/debug/hub", get(debug_hub_state))
            .fallback(not_found)
            .layer(build_cors_layer(&self.config.client_url))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to the configured address and serve until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Boardcast server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?userId=<id>&userName=<name>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let presence_task = self.presence.spawn();
        let app = self.router();

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        if let Some(task) = presence_task {
            task.abort();
        }

        result
    }
}
