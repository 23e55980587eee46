#![allow(dead_code)]

use std::sync::Arc;

use pantry_tracker::events::{self, Event};
use pantry_tracker::models::ItemInput;
use pantry_tracker::services::inventory::InventoryService;
use pantry_tracker::store::InMemoryDocumentStore;
use tokio::sync::mpsc;

pub const COLLECTION: &str = "inventory";

/// Inventory service over an in-memory store, with the event receiver
/// held so mutations can deliver.
pub struct TestApp {
    pub service: InventoryService,
    pub store: Arc<InMemoryDocumentStore>,
    pub events: mpsc::Receiver<Event>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryDocumentStore::new());
        let (event_sender, events) = events::channel(64);
        let service = InventoryService::new(store.clone(), COLLECTION, event_sender);
        Self {
            service,
            store,
            events,
        }
    }
}

pub fn input(
    name: &str,
    quantity: &str,
    description: &str,
    entry_date: &str,
    expiry_date: &str,
) -> ItemInput {
    ItemInput {
        name: name.to_string(),
        quantity: quantity.to_string(),
        description: description.to_string(),
        entry_date: entry_date.to_string(),
        expiry_date: expiry_date.to_string(),
    }
}
