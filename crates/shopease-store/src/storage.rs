//! # Storage Helper
//!
//! JSON-typed access to a [`KeyValueStore`] that never fails loudly.
//!
//! ## Failure Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_json(key)                                                          │
//! │    absent            → None                                             │
//! │    backend error     → error! logged, None                              │
//! │    malformed JSON    → warn! logged,  None                              │
//! │                                                                         │
//! │  set_json / remove / clear                                              │
//! │    ok                → true                                             │
//! │    any error         → error! logged, false                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers treat an unreadable value exactly like a missing one.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, warn};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;
use crate::repository::cart::CartRepository;
use crate::repository::checkout::CheckoutRepository;
use crate::repository::order::OrderRepository;

/// Cheaply cloneable handle over a shared backend.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Storage { backend }
    }

    /// Wraps a concrete backend.
    pub fn from_backend<B: KeyValueStore + 'static>(backend: B) -> Self {
        Storage {
            backend: Arc::new(backend),
        }
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Reads and decodes a value, with the error kept.
    pub async fn try_get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.backend.get(key).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StoreError::serialization(key, err))
    }

    /// Reads and decodes a value. Failures are logged and read as `None`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get_json(key).await {
            Ok(value) => value,
            Err(err @ StoreError::Serialization { .. }) => {
                warn!(key = %key, error = %err, "Ignoring unreadable stored value");
                None
            }
            Err(err) => {
                error!(key = %key, error = %err, "Failed to read stored value");
                None
            }
        }
    }

    /// Encodes and writes a value, with the error kept.
    pub async fn try_set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|err| StoreError::serialization(key, err))?;
        self.backend.set(key, &raw).await
    }

    /// Encodes and writes a value. Returns whether the write succeeded.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_set_json(key, value).await {
            Ok(()) => true,
            Err(err) => {
                error!(key = %key, error = %err, "Failed to write stored value");
                false
            }
        }
    }

    /// Removes a key. Returns whether the removal succeeded.
    pub async fn remove(&self, key: &str) -> bool {
        match self.backend.remove(key).await {
            Ok(()) => true,
            Err(err) => {
                error!(key = %key, error = %err, "Failed to remove stored value");
                false
            }
        }
    }

    /// Removes every key. Returns whether it succeeded.
    pub async fn clear(&self) -> bool {
        match self.backend.clear().await {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, "Failed to clear storage");
                false
            }
        }
    }

    // =========================================================================
    // Repositories
    // =========================================================================

    /// The `cart` key.
    pub fn cart(&self) -> CartRepository {
        CartRepository::new(self.clone())
    }

    /// The `checkoutCart` key.
    pub fn checkout(&self) -> CheckoutRepository {
        CheckoutRepository::new(self.clone())
    }

    /// The `orders` key.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.clone())
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use async_trait::async_trait;
    use serde::Deserialize;

    /// Backend whose every call fails.
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Internal("disk on fire".to_string()))
        }
        async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Internal("disk on fire".to_string()))
        }
        async fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Internal("disk on fire".to_string()))
        }
        async fn clear(&self) -> StoreResult<()> {
            Err(StoreError::Internal("disk on fire".to_string()))
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let storage = Storage::from_backend(MemoryStore::new());
        let note = Note {
            text: "hi".to_string(),
        };

        assert!(storage.set_json("note", &note).await);
        assert_eq!(storage.get_json::<Note>("note").await, Some(note));
        assert!(storage.remove("note").await);
        assert_eq!(storage.get_json::<Note>("note").await, None);
    }

    #[tokio::test]
    async fn test_malformed_value_reads_as_none() {
        let backend = Arc::new(MemoryStore::new());
        backend.set("note", "{not json").await.unwrap();
        let storage = Storage::new(backend);

        assert_eq!(storage.get_json::<Note>("note").await, None);
        assert!(matches!(
            storage.try_get_json::<Note>("note").await,
            Err(StoreError::Serialization { .. })
        ));
    }

    #[tokio::test]
    async fn test_backend_failures_are_swallowed() {
        let storage = Storage::from_backend(BrokenStore);

        assert_eq!(storage.get_json::<Note>("note").await, None);
        assert!(!storage.set_json("note", &1).await);
        assert!(!storage.remove("note").await);
        assert!(!storage.clear().await);
    }
}
