//! Redis-backed document store.
//!
//! Each collection maps to a single Redis hash (`{namespace}:{collection}`)
//! whose fields are document keys and whose values are the documents
//! serialized as JSON. Merge-writes are read-modify-write on the JSON
//! value; there is no optimistic concurrency control, matching the
//! single-caller contract of the service layer.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::{Document, DocumentStore, StoreError};

pub struct RedisDocumentStore {
    manager: ConnectionManager,
    namespace: String,
}

impl RedisDocumentStore {
    /// Opens a client and establishes a managed connection. Relies on the
    /// client's default timeouts; no retry policy of our own.
    pub async fn connect(url: &str, namespace: impl Into<String>) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let manager = client
            .get_tokio_connection_manager()
            .await
            .map_err(unavailable)?;
        Ok(Self {
            manager,
            namespace: namespace.into(),
        })
    }

    fn hash_key(&self, collection: &str) -> String {
        format!("{}:{}", self.namespace, collection)
    }
}

fn unavailable(err: redis::RedisError) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

fn encode(fields: &Document) -> Result<String, StoreError> {
    serde_json::to_string(fields).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode(key: &str, raw: &str) -> Result<Document, StoreError> {
    serde_json::from_str(raw).map_err(|e| {
        StoreError::Serialization(format!("document {:?} holds invalid JSON: {}", key, e))
    })
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError> {
        let mut con = self.manager.clone();
        let raw: HashMap<String, String> = con
            .hgetall(self.hash_key(collection))
            .await
            .map_err(unavailable)?;
        let mut docs = raw
            .into_iter()
            .map(|(key, value)| decode(&key, &value).map(|fields| (key, fields)))
            .collect::<Result<Vec<_>, _>>()?;
        docs.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(docs)
    }

    async fn get_one(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        let mut con = self.manager.clone();
        let raw: Option<String> = con
            .hget(self.hash_key(collection), key)
            .await
            .map_err(unavailable)?;
        raw.map(|value| decode(key, &value)).transpose()
    }

    async fn set_merge(
        &self,
        collection: &str,
        key: &str,
        fields: Document,
    ) -> Result<(), StoreError> {
        let mut doc = self.get_one(collection, key).await?.unwrap_or_default();
        for (name, value) in fields {
            doc.insert(name, value);
        }
        self.set_replace(collection, key, doc).await
    }

    async fn set_replace(
        &self,
        collection: &str,
        key: &str,
        fields: Document,
    ) -> Result<(), StoreError> {
        let mut con = self.manager.clone();
        let _: i64 = con
            .hset(self.hash_key(collection), key, encode(&fields)?)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let mut con = self.manager.clone();
        let _: i64 = con
            .hdel(self.hash_key(collection), key)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}
