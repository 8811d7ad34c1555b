//! Topic-based broadcast hub for course rooms, with viewer tracking.
//!
//! Uses one Tokio broadcast channel per topic. Also counts, per topic, which
//! users currently have a socket open so a room can report who is watching.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

type Topic = String;
type Sender = broadcast::Sender<String>;
type Receiver = broadcast::Receiver<String>;

/// Capacity of each topic channel. Slow sockets lag and skip older frames.
const CHANNEL_CAPACITY: usize = 100;

/// Manages broadcast channels per topic.
///
/// - Lazily creates a channel on first subscription
/// - Removes a topic when a send finds no receivers left
/// - Tracks viewers per topic with a refcount (one user, many tabs)
#[derive(Clone, Default)]
pub struct WebSocketManager {
    inner: Arc<RwLock<HashMap<Topic, Sender>>>,
    /// topic -> (user_id -> open sockets)
    viewers: Arc<RwLock<HashMap<Topic, HashMap<i64, usize>>>>,
}

impl WebSocketManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `topic`, creating it if necessary.
    pub async fn subscribe(&self, topic: &str) -> Receiver {
        let mut map = self.inner.write().await;
        map.entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Broadcasts a message to all subscribers of `topic`.
    ///
    /// No-op if nobody ever subscribed. A topic whose last receiver is gone is
    /// dropped after the send.
    pub async fn broadcast<T: Into<String>>(&self, topic: &str, msg: T) {
        let mut map = self.inner.write().await;
        if let Some(sender) = map.get(topic) {
            let _ = sender.send(msg.into());
            if sender.receiver_count() == 0 {
                tracing::debug!("Removing topic '{topic}' due to no subscribers.");
                map.remove(topic);
            }
        }
    }

    /// Whether `topic` currently has a live channel.
    pub async fn has_topic(&self, topic: &str) -> bool {
        self.inner.read().await.contains_key(topic)
    }

    // -------------------- Viewers --------------------

    /// Records one more open socket of `user_id` on `topic`.
    pub async fn register(&self, topic: &str, user_id: i64) {
        let mut v = self.viewers.write().await;
        let entry = v.entry(topic.to_string()).or_default();
        *entry.entry(user_id).or_insert(0) += 1;
    }

    /// Records one socket of `user_id` on `topic` closing.
    pub async fn unregister(&self, topic: &str, user_id: i64) {
        let mut v = self.viewers.write().await;
        if let Some(users) = v.get_mut(topic) {
            if let Some(cnt) = users.get_mut(&user_id) {
                if *cnt > 1 {
                    *cnt -= 1;
                } else {
                    users.remove(&user_id);
                }
            }
            if users.is_empty() {
                v.remove(topic);
            }
        }
    }

    /// Number of distinct users watching `topic`.
    pub async fn viewer_count(&self, topic: &str) -> usize {
        self.viewers
            .read()
            .await
            .get(topic)
            .map(|m| m.len())
            .unwrap_or(0)
    }
}
