//! Domain events emitted after successful inventory mutations.
//!
//! Delivery is fire-and-forget over a bounded mpsc channel; a failed send
//! surfaces as `ServiceError::EventError` but never rolls back the store
//! write that preceded it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ItemAdded {
        name: String,
        quantity: i64,
        timestamp: DateTime<Utc>,
    },
    ItemUpdated {
        name: String,
        quantity: i64,
        timestamp: DateTime<Utc>,
    },
    /// One unit consumed; the item still exists.
    ItemRemoved {
        name: String,
        remaining: i64,
        timestamp: DateTime<Utc>,
    },
    /// The last unit was consumed and the document deleted.
    ItemDepleted {
        name: String,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn item_added(name: &str, quantity: i64) -> Self {
        Event::ItemAdded {
            name: name.to_owned(),
            quantity,
            timestamp: Utc::now(),
        }
    }

    pub fn item_updated(name: &str, quantity: i64) -> Self {
        Event::ItemUpdated {
            name: name.to_owned(),
            quantity,
            timestamp: Utc::now(),
        }
    }

    pub fn item_removed(name: &str, remaining: i64) -> Self {
        Event::ItemRemoved {
            name: name.to_owned(),
            remaining,
            timestamp: Utc::now(),
        }
    }

    pub fn item_depleted(name: &str) -> Self {
        Event::ItemDepleted {
            name: name.to_owned(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Creates a bounded event channel and its sender handle.
pub fn channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}
