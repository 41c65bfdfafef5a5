use std::sync::Arc;

use crate::error::Result;
use crate::models::Preferences;
use crate::services::IdentityProvider;
use crate::store::{DocumentStore, USERS_COLLECTION};

/// Remote CRUD for the per-user preference record, keyed by the opaque
/// identity id. Reconciliation between this record and the local copy
/// belongs to the sync coordinator, not here.
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
    auth: Arc<dyn IdentityProvider>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn IdentityProvider>) -> Self {
        Self { store, auth }
    }

    /// Write preferences remotely. Merge-write so unknown fields written
    /// by newer client versions survive.
    pub async fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        let uid = self.auth.ensure_identity().await?;
        self.store
            .set(USERS_COLLECTION, &uid, preferences.to_document(), true)
            .await
    }

    /// Fetch the remote preference record, if one was ever written.
    pub async fn fetch_preferences(&self) -> Result<Option<Preferences>> {
        let uid = self.auth.ensure_identity().await?;
        let Some(doc) = self.store.get(USERS_COLLECTION, &uid).await? else {
            return Ok(None);
        };

        match Preferences::from_document(&doc) {
            Some(preferences) => Ok(Some(preferences)),
            None => {
                tracing::warn!("Undecodable preference record for {}", uid);
                Ok(None)
            }
        }
    }
}
