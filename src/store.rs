//! Cloud-storage adapter boundary.
//!
//! The host platform exposes a key-value store scoped to the user and
//! app. The crate only ever touches it through the [`CloudStore`] trait
//! so the repository stays testable with an in-memory fake.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

/// Storage key the entire task collection is persisted under, as one
/// serialized JSON array.
pub const TASKS_KEY: &str = "clarity_tasks";

/// Failure reported by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Asynchronous key-value storage, one string value per key.
#[async_trait]
pub trait CloudStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and hosts without platform storage.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CloudStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.lock().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get_item(TASKS_KEY).await.unwrap().is_none());
        store.set_item(TASKS_KEY, "[]").await.unwrap();
        assert_eq!(store.get_item(TASKS_KEY).await.unwrap().as_deref(), Some("[]"));
        store.set_item(TASKS_KEY, "[1]").await.unwrap();
        assert_eq!(store.get_item(TASKS_KEY).await.unwrap().as_deref(), Some("[1]"));
    }
}
