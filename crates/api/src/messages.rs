//! Transient per-user status messages.
//!
//! A bulk action pushes its result here for the administrator who ran it;
//! the next `GET /admin/messages` drains the queue. Each queue keeps at
//! most [`MAX_QUEUED`] messages; older ones are dropped first.

use std::collections::HashMap;

use panda_core::status_message::StatusMessage;
use panda_core::types::DbId;
use tokio::sync::RwLock;

/// Upper bound on undrained messages kept per user.
pub const MAX_QUEUED: usize = 50;

/// In-memory message queues keyed by user id.
#[derive(Debug, Default)]
pub struct MessageStore {
    queues: RwLock<HashMap<DbId, Vec<StatusMessage>>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the user's queue, dropping the oldest one when
    /// the queue is full.
    pub async fn push(&self, user_id: DbId, message: StatusMessage) {
        let mut queues = self.queues.write().await;
        let queue = queues.entry(user_id).or_default();
        if queue.len() >= MAX_QUEUED {
            let excess = queue.len() + 1 - MAX_QUEUED;
            queue.drain(..excess);
        }
        queue.push(message);
    }

    /// Remove and return every queued message for the user, oldest first.
    pub async fn drain(&self, user_id: DbId) -> Vec<StatusMessage> {
        self.queues
            .write()
            .await
            .remove(&user_id)
            .unwrap_or_default()
    }

    /// Number of messages waiting for the user.
    pub async fn pending(&self, user_id: DbId) -> usize {
        self.queues
            .read()
            .await
            .get(&user_id)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use panda_core::status_message::PluralRule;

    use super::*;

    #[tokio::test]
    async fn drain_returns_messages_in_order_and_empties_queue() {
        let store = MessageStore::new();
        store
            .push(1, StatusMessage::rows_updated(1, PluralRule::Slavic))
            .await;
        store
            .push(1, StatusMessage::rows_updated(3, PluralRule::Slavic))
            .await;
        assert_eq!(store.pending(1).await, 2);

        let drained = store.drain(1).await;
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].text, "1 запись была обновлена");
        assert_eq!(drained[1].text, "3 записи были обновлены");
        assert!(store.drain(1).await.is_empty());
    }

    #[tokio::test]
    async fn queues_are_per_user() {
        let store = MessageStore::new();
        store
            .push(1, StatusMessage::rows_updated(7, PluralRule::Slavic))
            .await;

        assert!(store.drain(2).await.is_empty());
        assert_eq!(store.pending(1).await, 1);
    }

    #[tokio::test]
    async fn full_queue_drops_oldest() {
        let store = MessageStore::new();
        for count in 1..=(MAX_QUEUED as u64 + 2) {
            store
                .push(1, StatusMessage::rows_updated(count, PluralRule::English))
                .await;
        }
        assert_eq!(store.pending(1).await, MAX_QUEUED);

        let drained = store.drain(1).await;
        assert_eq!(drained[0].text, "3 records were updated");
        assert_eq!(
            drained[MAX_QUEUED - 1].text,
            format!("{} records were updated", MAX_QUEUED + 2)
        );
    }
}
