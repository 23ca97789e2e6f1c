//! Helpers shared by the use case tests.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    domain::{
        Connection, ConnectionId, DisplayName, HubRepository, MessagePusher, Timestamp, UserId,
    },
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryHubRepository},
};

pub struct TestHub {
    pub repository: Arc<InMemoryHubRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
}

/// A registered connection and the receiving end of its outbound channel
pub struct TestClient {
    pub connection: Connection,
    pub rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    pub fn id(&self) -> ConnectionId {
        self.connection.id
    }

    /// Drain every frame received so far as `(event, data)` pairs
    pub fn drain(&mut self) -> Vec<(String, Value)> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            let value: Value = serde_json::from_str(&frame).unwrap();
            frames.push((
                value["event"].as_str().unwrap().to_string(),
                value["data"].clone(),
            ));
        }
        frames
    }

    /// Event names received so far
    pub fn drain_names(&mut self) -> Vec<String> {
        self.drain().into_iter().map(|(name, _)| name).collect()
    }
}

impl TestHub {
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryHubRepository::default()),
            pusher: Arc::new(WebSocketMessagePusher::default()),
        }
    }

    /// Register a connection directly, bypassing presence publication
    pub async fn connect(&self, user: &str, name: &str) -> TestClient {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection = Connection::new(
            ConnectionId::generate(),
            UserId::new(user),
            DisplayName::new(name),
            Timestamp::new(1000),
        );
        self.pusher.register_client(connection.id, tx).await;
        self.repository.register_connection(connection.clone()).await;
        TestClient { connection, rx }
    }
}
