//! Helpers for the integration tests: an in-process server and WebSocket test clients.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use boardcast_server::{app::build_server, config::ServerConfig};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);
pub const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Start a server on an ephemeral port and return its address
pub async fn start_server() -> SocketAddr {
    start_server_with(ServerConfig::default()).await
}

pub async fn start_server_with(config: ServerConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    let server = build_server(config);

    tokio::spawn(async move {
        server
            .serve(listener, std::future::pending())
            .await
            .expect("Server failed");
    });

    addr
}

/// Poll the HTTP API until `kind/id` has `count` members
pub async fn wait_for_members(addr: SocketAddr, kind: &str, id: &str, count: usize) {
    let url = format!("http://{addr}/api/groups/{kind}/{id}");
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    loop {
        let body: Value = reqwest::get(&url)
            .await
            .expect("Group request failed")
            .json()
            .await
            .expect("Group response is not JSON");
        if body["memberCount"] == json!(count) {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "{kind}/{id} never reached {count} member(s): {body}"
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

pub struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect with a handshake identity
    pub async fn connect(addr: SocketAddr, user_id: &str, user_name: &str) -> Self {
        Self::connect_url(format!(
            "ws://{addr}/ws?userId={user_id}&userName={user_name}"
        ))
        .await
    }

    /// Connect without any handshake parameters
    pub async fn connect_anonymous(addr: SocketAddr) -> Self {
        Self::connect_url(format!("ws://{addr}/ws")).await
    }

    async fn connect_url(url: String) -> Self {
        let (ws, _) = connect_async(url).await.expect("Failed to connect");
        Self { ws }
    }

    pub async fn send(&mut self, event: &str, data: Value) {
        self.send_raw(&json!({"event": event, "data": data}).to_string())
            .await;
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.ws
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }

    /// Next event frame within `wait`, as `(event, data)`
    pub async fn next_event(&mut self, wait: Duration) -> Option<(String, Value)> {
        loop {
            let msg = tokio::time::timeout(wait, self.ws.next()).await.ok()??;
            if let Ok(Message::Text(text)) = msg {
                let value: Value = serde_json::from_str(text.as_str()).expect("Frame is not JSON");
                let name = value["event"].as_str().expect("Frame has no event").to_string();
                return Some((name, value["data"].clone()));
            }
        }
    }

    /// Skip frames until `name` arrives and return its data
    pub async fn expect_event(&mut self, name: &str) -> Value {
        loop {
            match self.next_event(RECV_TIMEOUT).await {
                Some((event, data)) if event == name => return data,
                Some(_) => continue,
                None => panic!("Timed out waiting for '{name}'"),
            }
        }
    }

    /// Assert that no `name` frame arrives during the quiet period
    pub async fn expect_no_event(&mut self, name: &str) {
        while let Some((event, data)) = self.next_event(QUIET_PERIOD).await {
            assert_ne!(event, name, "Unexpected '{name}': {data}");
        }
    }

    /// Discard everything received so far
    pub async fn drain(&mut self) {
        while self.next_event(Duration::from_millis(100)).await.is_some() {}
    }
}
