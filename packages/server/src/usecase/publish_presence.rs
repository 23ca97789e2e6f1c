//! UseCase: プレゼンス配信
//!
//! 接続レジストリが変化するたびに `online-users` を全接続へ配信します。
//! `PresenceBroadcaster` は配信要求を受け付け、設定された時間窓の中で
//! 発生した要求を1回の配信にまとめます（時間窓 0 の場合は即時配信）。

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{
    sync::{Mutex, Notify},
    task::JoinHandle,
};

use crate::domain::{HubEvent, HubRepository, MessagePusher};

/// プレゼンス配信のユースケース
pub struct PublishPresenceUseCase {
    repository: Arc<dyn HubRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    /// Held from snapshot until delivery so publications reach clients in snapshot order
    publish_guard: Mutex<()>,
}

impl PublishPresenceUseCase {
    pub fn new(repository: Arc<dyn HubRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            repository,
            message_pusher,
            publish_guard: Mutex::new(()),
        }
    }

    /// Compute the snapshot now and deliver it to every live connection.
    ///
    /// Returns the number of connections targeted.
    pub async fn execute(&self) -> usize {
        let _guard = self.publish_guard.lock().await;
        let (snapshot, targets) = self.repository.presence_with_targets().await;
        let count = targets.len();

        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &HubEvent::OnlineUsers(snapshot))
            .await
        {
            tracing::warn!("Failed to publish online users: {}", e);
        }
        tracing::debug!("Published online users to {} connection(s)", count);

        count
    }
}

/// Front of [`PublishPresenceUseCase`] that optionally coalesces bursts.
pub struct PresenceBroadcaster {
    publisher: Arc<PublishPresenceUseCase>,
    window: Duration,
    pending: Arc<AtomicBool>,
    wakeup: Arc<Notify>,
}

impl PresenceBroadcaster {
    pub fn new(publisher: Arc<PublishPresenceUseCase>, window: Duration) -> Self {
        Self {
            publisher,
            window,
            pending: Arc::new(AtomicBool::new(false)),
            wakeup: Arc::new(Notify::new()),
        }
    }

    /// Publish after every request, without coalescing
    pub fn immediate(publisher: Arc<PublishPresenceUseCase>) -> Self {
        Self::new(publisher, Duration::ZERO)
    }

    /// Ask for a presence publication.
    ///
    /// With a zero window the snapshot is published before this returns.
    /// Otherwise the coalescing loop started by [`spawn`](Self::spawn)
    /// publishes once at the end of the window.
    pub async fn request_publish(&self) {
        if self.window.is_zero() {
            self.publisher.execute().await;
            return;
        }
        self.pending.store(true, Ordering::Release);
        self.wakeup.notify_one();
    }

    /// Start the coalescing loop. Returns `None` when the window is zero.
    pub fn spawn(&self) -> Option<JoinHandle<()>> {
        if self.window.is_zero() {
            return None;
        }

        let publisher = self.publisher.clone();
        let pending = self.pending.clone();
        let wakeup = self.wakeup.clone();
        let window = self.window;

        tracing::info!("Presence publication coalesced over {:?}", window);
        Some(tokio::spawn(async move {
            loop {
                wakeup.notified().await;
                tokio::time::sleep(window).await;
                // The snapshot is taken after the window, so every request
                // that arrived during it is covered by this publication.
                if pending.swap(false, Ordering::AcqRel) {
                    publisher.execute().await;
                }
            }
        }))
    }
}
