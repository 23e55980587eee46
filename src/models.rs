use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::errors::ServiceError;
use crate::store::Document;

/// Document field names in the inventory collection. The item name is the
/// document key, not a field.
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_ENTRY_DATE: &str = "entryDate";
pub const FIELD_EXPIRY_DATE: &str = "expiryDate";

/// A pantry item as read back from the store.
///
/// `quantity` is always positive while stored; an item whose quantity
/// would reach zero is deleted instead of persisted. The date strings are
/// opaque to the core and carried through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entry_date: String,
    #[serde(default)]
    pub expiry_date: String,
}

impl InventoryItem {
    /// Rehydrates an item from its document key and fields. A missing or
    /// non-integer stored quantity is a serialization error, never a
    /// silent default.
    pub fn from_document(name: &str, fields: &Document) -> Result<Self, ServiceError> {
        let quantity = quantity_of(fields).ok_or_else(|| {
            ServiceError::Serialization(format!(
                "document {:?} has a missing or non-integer quantity",
                name
            ))
        })?;
        Ok(Self {
            name: name.to_owned(),
            quantity,
            description: string_field(fields, FIELD_DESCRIPTION),
            entry_date: string_field(fields, FIELD_ENTRY_DATE),
            expiry_date: string_field(fields, FIELD_EXPIRY_DATE),
        })
    }
}

/// Reads the stored quantity, if it is present and an integer.
pub fn quantity_of(fields: &Document) -> Option<i64> {
    fields.get(FIELD_QUANTITY).and_then(Value::as_i64)
}

fn string_field(fields: &Document, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Form payload crossing the presentation boundary.
///
/// `quantity` arrives as the raw text the user typed; the service parses
/// and validates it (see `InventoryService`).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ItemInput {
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: String,
    pub quantity: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entry_date: String,
    #[serde(default)]
    pub expiry_date: String,
}

impl ItemInput {
    /// Builds the document fields for a write, with the quantity the
    /// service decided on (parsed for a create, accumulated for an
    /// existing item).
    pub fn fields_with_quantity(&self, quantity: i64) -> Document {
        let mut fields = Document::new();
        fields.insert(FIELD_QUANTITY.to_string(), Value::from(quantity));
        fields.insert(
            FIELD_DESCRIPTION.to_string(),
            Value::from(self.description.clone()),
        );
        fields.insert(
            FIELD_ENTRY_DATE.to_string(),
            Value::from(self.entry_date.clone()),
        );
        fields.insert(
            FIELD_EXPIRY_DATE.to_string(),
            Value::from(self.expiry_date.clone()),
        );
        fields
    }
}
