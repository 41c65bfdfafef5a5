use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::{AppError, Result};
use crate::store::{is_server_timestamp, DocumentStore};

/// In-memory document store for tests and offline development.
///
/// Mirrors the remote backend's observable behavior: server-timestamp
/// sentinels resolve to the wall clock at write time, merge preserves
/// untouched fields, and a batch commits under one lock so it is atomic
/// with respect to concurrent readers.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, HashMap<String, Value>>>,
    offline: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail, simulating an unreachable
    /// backend. Test use only.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of documents in a collection. Test use only.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(HashMap::len)
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Store("store unreachable".to_string()));
        }
        Ok(())
    }

    /// Resolve server-timestamp sentinels in top-level fields, the way the
    /// real store does at commit time.
    fn resolve_timestamps(fields: &mut Value) {
        if let Some(object) = fields.as_object_mut() {
            for value in object.values_mut() {
                if is_server_timestamp(value) {
                    *value = json!(Utc::now().to_rfc3339());
                }
            }
        }
    }

    fn write(
        collections: &mut HashMap<String, HashMap<String, Value>>,
        collection: &str,
        key: String,
        mut fields: Value,
        merge: bool,
    ) {
        Self::resolve_timestamps(&mut fields);
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.get_mut(&key) {
            Some(existing) if merge => {
                if let (Some(target), Some(source)) =
                    (existing.as_object_mut(), fields.as_object())
                {
                    for (name, value) in source {
                        target.insert(name.clone(), value.clone());
                    }
                    return;
                }
                documents.insert(key, fields);
            }
            _ => {
                documents.insert(key, fields);
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        self.check_online()?;
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|documents| documents.get(key))
            .cloned())
    }

    async fn exists(&self, collection: &str, key: &str) -> Result<bool> {
        self.check_online()?;
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .is_some_and(|documents| documents.contains_key(key)))
    }

    async fn set(&self, collection: &str, key: &str, fields: Value, merge: bool) -> Result<()> {
        self.check_online()?;
        let mut collections = self.collections.lock().unwrap();
        Self::write(&mut collections, collection, key.to_string(), fields, merge);
        Ok(())
    }

    async fn batch_set(&self, collection: &str, writes: Vec<(String, Value)>) -> Result<()> {
        self.check_online()?;
        let mut collections = self.collections.lock().unwrap();
        for (key, fields) in writes {
            Self::write(&mut collections, collection, key, fields, false);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryDocumentStore::new();
        store
            .set("things", "a", json!({"value": 1}), false)
            .await
            .unwrap();
        let doc = store.get("things", "a").await.unwrap().unwrap();
        assert_eq!(doc["value"], 1);
        assert!(store.exists("things", "a").await.unwrap());
        assert!(!store.exists("things", "b").await.unwrap());
        assert!(store.get("things", "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn merge_preserves_existing_fields() {
        let store = MemoryDocumentStore::new();
        store
            .set("things", "a", json!({"keep": true, "value": 1}), false)
            .await
            .unwrap();
        store
            .set("things", "a", json!({"value": 2}), true)
            .await
            .unwrap();
        let doc = store.get("things", "a").await.unwrap().unwrap();
        assert_eq!(doc["keep"], true);
        assert_eq!(doc["value"], 2);
    }

    #[tokio::test]
    async fn sentinel_resolves_to_a_timestamp() {
        let store = MemoryDocumentStore::new();
        store
            .set(
                "things",
                "a",
                json!({"createdAt": crate::store::server_timestamp()}),
                false,
            )
            .await
            .unwrap();
        let doc = store.get("things", "a").await.unwrap().unwrap();
        assert!(doc["createdAt"].is_string());
    }

    #[tokio::test]
    async fn offline_store_errors() {
        let store = MemoryDocumentStore::new();
        store.set_offline(true);
        assert!(store.get("things", "a").await.is_err());
        assert!(store
            .set("things", "a", json!({}), false)
            .await
            .is_err());
    }
}
