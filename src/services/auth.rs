use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};

/// Issues the opaque stable identity used to key remote preference
/// records. `ensure_identity` is idempotent: the first call may perform a
/// one-time anonymous enrollment, later calls return the same id.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn ensure_identity(&self) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct EnrollRequest {}

#[derive(Debug, Serialize, Deserialize)]
struct StoredIdentity {
    uid: String,
}

/// Identity provider backed by the document API's anonymous enrollment
/// endpoint. The enrolled id is persisted next to the config so it stays
/// stable across launches and reinstalls of the same profile.
pub struct RestIdentityProvider {
    client: Client,
    enroll_url: String,
    api_key: String,
    identity_path: PathBuf,
    cached: Mutex<Option<String>>,
}

impl RestIdentityProvider {
    pub fn new(base_url: &str, api_key: String, identity_path: PathBuf) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        let enroll_url = format!("{}auth/anonymous", ensure_trailing_slash(base_url));
        Self {
            client,
            enroll_url,
            api_key,
            identity_path,
            cached: Mutex::new(None),
        }
    }

    fn load_persisted(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.identity_path).ok()?;
        let stored: StoredIdentity = serde_json::from_str(&content).ok()?;
        Some(stored.uid)
    }

    fn persist(&self, uid: &str) {
        if let Some(parent) = self.identity_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let stored = StoredIdentity {
            uid: uid.to_string(),
        };
        match serde_json::to_string(&stored) {
            Ok(content) => {
                if let Err(e) = std::fs::write(&self.identity_path, content) {
                    tracing::warn!("Failed to persist identity: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to encode identity: {}", e),
        }
    }

    async fn enroll(&self) -> Result<String> {
        let response = self
            .client
            .post(&self.enroll_url)
            .bearer_auth(&self.api_key)
            .json(&EnrollRequest {})
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Auth(format!(
                "enrollment failed: HTTP {}",
                response.status()
            )));
        }

        let stored: StoredIdentity = response
            .json()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;
        tracing::info!("Enrolled anonymous identity");
        Ok(stored.uid)
    }
}

fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn ensure_identity(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(uid) = cached.as_ref() {
            return Ok(uid.clone());
        }
        if let Some(uid) = self.load_persisted() {
            *cached = Some(uid.clone());
            return Ok(uid);
        }

        let uid = self.enroll().await?;
        self.persist(&uid);
        *cached = Some(uid.clone());
        Ok(uid)
    }
}

/// Fixed identity for tests and local tooling.
pub struct StaticIdentityProvider(pub String);

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn ensure_identity(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Used when no backend is configured; identity can never be established.
pub struct UnconfiguredIdentityProvider;

#[async_trait]
impl IdentityProvider for UnconfiguredIdentityProvider {
    async fn ensure_identity(&self) -> Result<String> {
        Err(AppError::NotConfigured)
    }
}
