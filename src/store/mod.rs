//! Abstract remote document persistence.
//!
//! The rest of the crate only sees the [`DocumentStore`] trait: per-key
//! get/set/exists plus an atomic batch commit. The production backend is a
//! REST document API ([`rest::RestDocumentStore`]); tests and offline
//! development use the in-memory [`memory::MemoryDocumentStore`].

mod memory;
mod rest;

pub use memory::MemoryDocumentStore;
pub use rest::RestDocumentStore;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{AppError, Result};

/// Collection holding horoscope documents, keyed by the canonical key.
pub const HOROSCOPES_COLLECTION: &str = "horoscopes";
/// Collection holding per-user preference records, keyed by identity id.
pub const USERS_COLLECTION: &str = "users";

/// Field name marking a server-timestamp sentinel inside a document.
const SERVER_TIMESTAMP_FIELD: &str = "$serverTimestamp";

/// Sentinel written in place of a timestamp; the store resolves it to its
/// own clock at commit time. Clients never write a concrete creation time.
pub fn server_timestamp() -> Value {
    json!({ SERVER_TIMESTAMP_FIELD: true })
}

/// Whether a field value is the server-timestamp sentinel.
pub fn is_server_timestamp(value: &Value) -> bool {
    value
        .get(SERVER_TIMESTAMP_FIELD)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Narrow interface to the remote document backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document. Absent keys are `Ok(None)`, not errors.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>>;

    /// Whether a document exists under this key.
    async fn exists(&self, collection: &str, key: &str) -> Result<bool>;

    /// Write a document. With `merge`, existing fields not present in
    /// `fields` are preserved; without, the document is replaced.
    async fn set(&self, collection: &str, key: &str, fields: Value, merge: bool) -> Result<()>;

    /// Write several documents in one commit, atomic across the listed
    /// keys only.
    async fn batch_set(&self, collection: &str, writes: Vec<(String, Value)>) -> Result<()>;
}

/// Placeholder used when no backend is configured. Every operation fails
/// with [`AppError::NotConfigured`] so local-only paths keep working while
/// remote ones fail fast with the right diagnosis.
pub struct UnconfiguredStore;

#[async_trait]
impl DocumentStore for UnconfiguredStore {
    async fn get(&self, _collection: &str, _key: &str) -> Result<Option<Value>> {
        Err(AppError::NotConfigured)
    }

    async fn exists(&self, _collection: &str, _key: &str) -> Result<bool> {
        Err(AppError::NotConfigured)
    }

    async fn set(&self, _collection: &str, _key: &str, _fields: Value, _merge: bool) -> Result<()> {
        Err(AppError::NotConfigured)
    }

    async fn batch_set(&self, _collection: &str, _writes: Vec<(String, Value)>) -> Result<()> {
        Err(AppError::NotConfigured)
    }
}
