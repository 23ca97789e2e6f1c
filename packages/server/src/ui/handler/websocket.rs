//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{Connection, DisplayName, HubCommand, HubEvent, UserId},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

/// Handshake parameters. Both are optional; a missing `userId` is anonymous.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandshakeQuery {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<HandshakeQuery>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, query))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the channel closes or the socket stops accepting frames.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, query: HandshakeQuery) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    let connection = state
        .connect_connection_usecase
        .execute(
            UserId::from(query.user_id),
            DisplayName::from(query.user_name),
            tx,
        )
        .await;

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let session = connection.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", session.id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => handle_text(&state_clone, &session, text.as_str()).await,
                Message::Ping(_) => {
                    tracing::debug!("Received ping from '{}'", session.id);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", session.id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    let recv_finished = tokio::select! {
        _ = &mut recv_task => true,
        _ = &mut send_task => false,
    };
    if recv_finished {
        send_task.abort();
    } else {
        recv_task.abort();
        // A frame being applied must settle before the cleanup below
        let _ = recv_task.await;
    }

    state
        .disconnect_connection_usecase
        .execute(&connection.id)
        .await;
}

/// Decode one text frame and apply it. Bad frames are dropped and logged.
async fn handle_text(state: &AppState, connection: &Connection, text: &str) {
    let command = match ClientEvent::decode(text).and_then(HubCommand::try_from) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Dropping frame from '{}': {}", connection.id, e);
            return;
        }
    };

    dispatch(state, connection, command).await;
}

async fn dispatch(state: &AppState, connection: &Connection, command: HubCommand) {
    match command {
        HubCommand::Join(group) => {
            state
                .join_group_usecase
                .execute(group, connection.id)
                .await;
        }
        HubCommand::Leave(group) => {
            state
                .leave_group_usecase
                .execute(&group, &connection.id)
                .await;
        }
        HubCommand::Relay {
            group,
            event,
            exclude_source,
        } => {
            state
                .route_event_usecase
                .execute(&group, &HubEvent::Relay(event), &connection.id, exclude_source)
                .await;
        }
        HubCommand::Typing { channel, active } => {
            let user_id = connection.user_id.clone();
            let display_name = connection.display_name.clone();
            let event = if active {
                HubEvent::TypingStarted {
                    channel: channel.clone(),
                    user_id,
                    display_name,
                }
            } else {
                HubEvent::TypingStopped {
                    channel: channel.clone(),
                    user_id,
                    display_name,
                }
            };
            state
                .route_event_usecase
                .execute(&channel, &event, &connection.id, true)
                .await;
        }
        HubCommand::Notify { target, payload } => {
            state
                .send_notification_usecase
                .execute(target, payload, &connection.id)
                .await;
        }
    }
}
