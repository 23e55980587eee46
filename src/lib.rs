//! Pantry Tracker core
//!
//! A document-store backed inventory repository plus the pure view
//! projection (filtered list and pie-chart series) a presentation shell
//! renders from. The shell itself lives elsewhere; this crate owns the
//! merge/decrement rules and the snapshot-derivation logic.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod projection;
pub mod services;
pub mod store;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{AppConfig, StoreConfig};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::inventory::InventoryService;
use crate::store::{DocumentStore, InMemoryDocumentStore, RedisDocumentStore};

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Shared application state handed to whatever shell drives the core.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub inventory_service: InventoryService,
    pub event_sender: EventSender,
}

impl AppState {
    /// Builds the configured store backend and wires the service and
    /// event channel. The returned receiver carries every domain event;
    /// dropping it makes subsequent mutations fail their event send.
    pub async fn new(config: AppConfig) -> Result<(Self, mpsc::Receiver<Event>), ServiceError> {
        let store = build_store(&config.store).await?;
        let (event_sender, event_rx) = events::channel(EVENT_CHANNEL_CAPACITY);
        let inventory_service = InventoryService::new(
            store,
            config.store.collection.clone(),
            event_sender.clone(),
        );
        Ok((
            Self {
                config,
                inventory_service,
                event_sender,
            },
            event_rx,
        ))
    }
}

/// Selects and connects the configured document store backend.
pub async fn build_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, ServiceError> {
    match config.backend.as_str() {
        "in-memory" => Ok(Arc::new(InMemoryDocumentStore::new())),
        "redis" => {
            let store =
                RedisDocumentStore::connect(&config.redis_url, config.namespace.clone()).await?;
            Ok(Arc::new(store))
        }
        other => Err(ServiceError::InvalidInput(format!(
            "unknown store backend {:?}",
            other
        ))),
    }
}
