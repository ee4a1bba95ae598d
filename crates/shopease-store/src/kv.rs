//! # Key-Value Backends
//!
//! The storefront persists a handful of JSON documents under fixed keys.
//! Backends only move strings; encoding lives in [`crate::storage`].
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   trait KeyValueStore        │
//! │   get / set / remove / clear │
//! └──────────────┬───────────────┘
//!        ┌───────┴────────┐
//!        ▼                ▼
//!   SqliteStore       MemoryStore
//!   (pool.rs)         (tests, ephemeral sessions)
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreResult;

/// Backend for persisted string values.
///
/// Every write replaces the whole value; there is no merge and the last
/// writer wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, `None` when the key is absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Removes every key.
    async fn clear(&self) -> StoreResult<()>;
}

/// In-memory backend. Values are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        self.values.write().await.clear();
        Ok(())
    }
}
