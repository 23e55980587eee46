//! Inventory service: the repository owning the merge/decrement rules
//! over the document store.
//!
//! Every mutation is a sequence of independent round trips with no
//! transaction across them; a concurrent read-modify-write on the same
//! item can race. Acceptable for the single-caller scope this service
//! targets.

use std::sync::Arc;

use tracing::{debug, info, instrument};
use validator::Validate;

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{self, InventoryItem, ItemInput, FIELD_QUANTITY};
use crate::store::{Document, DocumentStore};

/// Service for managing pantry inventory
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn DocumentStore>,
    collection: String,
    events: EventSender,
}

impl InventoryService {
    /// Creates a new inventory service over the given store backend.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
        events: EventSender,
    ) -> Self {
        Self {
            store,
            collection: collection.into(),
            events,
        }
    }

    /// Reads every document in the collection, in store enumeration
    /// order. Pure read; callers replace their snapshot wholesale with
    /// the result.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        let docs = self.store.get_all(&self.collection).await?;
        docs.iter()
            .map(|(key, fields)| InventoryItem::from_document(key, fields))
            .collect()
    }

    /// Adds units of an item. A previously-unseen name creates the
    /// document with the supplied fields; an existing one accumulates
    /// quantity while description and dates are replaced with the new
    /// values. Callers re-invoke [`list`](Self::list) to observe the
    /// result.
    #[instrument(skip(self, input), fields(item = %input.name))]
    pub async fn add_item(&self, input: ItemInput) -> Result<(), ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
        let quantity = parse_quantity(&input.quantity)?;

        match self.store.get_one(&self.collection, &input.name).await? {
            Some(fields) => {
                let stored = stored_quantity(&input.name, &fields)?;
                let total = stored + quantity;
                self.store
                    .set_merge(
                        &self.collection,
                        &input.name,
                        input.fields_with_quantity(total),
                    )
                    .await?;
                info!(added = quantity, total, "accumulated existing item");
            }
            None => {
                self.store
                    .set_replace(
                        &self.collection,
                        &input.name,
                        input.fields_with_quantity(quantity),
                    )
                    .await?;
                info!(quantity, "created item");
            }
        }

        self.events
            .send(Event::item_added(&input.name, quantity))
            .await
            .map_err(ServiceError::EventError)
    }

    /// Overwrites all fields of an item with no read-before-write. The
    /// merge-write creates the document when the name is absent, so no
    /// existence check is needed.
    #[instrument(skip(self, input), fields(item = %input.name))]
    pub async fn update_item(&self, input: ItemInput) -> Result<(), ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
        let quantity = parse_quantity(&input.quantity)?;

        self.store
            .set_merge(
                &self.collection,
                &input.name,
                input.fields_with_quantity(quantity),
            )
            .await?;
        info!(quantity, "updated item");

        self.events
            .send(Event::item_updated(&input.name, quantity))
            .await
            .map_err(ServiceError::EventError)
    }

    /// Consumes exactly one unit. An unknown name is a silent no-op; the
    /// last unit deletes the document rather than persisting a zero
    /// quantity. Removing several units means calling this repeatedly.
    #[instrument(skip(self))]
    pub async fn remove_one(&self, name: &str) -> Result<(), ServiceError> {
        let Some(fields) = self.store.get_one(&self.collection, name).await? else {
            debug!(item = %name, "remove for unknown item ignored");
            return Ok(());
        };
        let quantity = stored_quantity(name, &fields)?;

        if quantity <= 1 {
            self.store.delete(&self.collection, name).await?;
            info!(item = %name, "last unit consumed, item deleted");
            self.events
                .send(Event::item_depleted(name))
                .await
                .map_err(ServiceError::EventError)
        } else {
            let remaining = quantity - 1;
            let mut patch = Document::new();
            patch.insert(FIELD_QUANTITY.to_string(), remaining.into());
            self.store.set_merge(&self.collection, name, patch).await?;
            info!(item = %name, remaining, "one unit consumed");
            self.events
                .send(Event::item_removed(name, remaining))
                .await
                .map_err(ServiceError::EventError)
        }
    }
}

fn stored_quantity(name: &str, fields: &Document) -> Result<i64, ServiceError> {
    models::quantity_of(fields).ok_or_else(|| {
        ServiceError::Serialization(format!(
            "stored quantity for {:?} is missing or not an integer",
            name
        ))
    })
}

/// Parses user-entered quantity text. The stored-quantity invariant
/// requires a positive integer, so anything else is rejected here rather
/// than written through.
fn parse_quantity(text: &str) -> Result<i64, ServiceError> {
    let quantity: i64 = text.trim().parse().map_err(|_| {
        ServiceError::InvalidQuantity(format!("{:?} is not an integer", text))
    })?;
    if quantity < 1 {
        return Err(ServiceError::InvalidQuantity(format!(
            "quantity must be at least 1, got {}",
            quantity
        )));
    }
    Ok(quantity)
}
