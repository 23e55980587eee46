//! Document store boundary.
//!
//! The inventory service talks to a remote, keyed document database
//! through [`DocumentStore`]. Each call is an independent round trip;
//! there is no transaction spanning calls and no automatic retry.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod memory;
pub mod redis;

pub use memory::InMemoryDocumentStore;
pub use redis::RedisDocumentStore;

/// A schemaless document: named fields with JSON values.
pub type Document = serde_json::Map<String, Value>;

/// Store-layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Keyed document storage with merge-write semantics.
///
/// `set_merge` overwrites only the supplied fields and leaves the rest of
/// the document untouched; it creates the document when the key is absent.
/// `set_replace` overwrites the whole document. `get_all` enumerates in
/// the backend's native order; both provided backends enumerate by
/// ascending key.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_all(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError>;

    async fn get_one(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError>;

    async fn set_merge(
        &self,
        collection: &str,
        key: &str,
        fields: Document,
    ) -> Result<(), StoreError>;

    async fn set_replace(
        &self,
        collection: &str,
        key: &str,
        fields: Document,
    ) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError>;
}
