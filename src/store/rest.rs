use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::store::DocumentStore;

use async_trait::async_trait;

/// Document store backed by a REST document API.
///
/// Layout: `GET/PUT/PATCH {base}/{collection}/{key}` for single documents,
/// `POST {base}/{collection}:commit` for an atomic batch. Server-timestamp
/// sentinels pass through unchanged; the API resolves them at commit time.
pub struct RestDocumentStore {
    client: Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct BatchCommitRequest {
    writes: Vec<BatchWrite>,
}

#[derive(Debug, Serialize)]
struct BatchWrite {
    key: String,
    fields: Value,
}

impl RestDocumentStore {
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        // A trailing slash keeps Url::join from eating the last segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| AppError::Config(format!("invalid store URL {base_url}: {e}")))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("astroline/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn document_url(&self, collection: &str, key: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{collection}/{key}"))
            .map_err(|e| AppError::Store(format!("bad document path: {e}")))
    }

    fn collection_op_url(&self, collection: &str, op: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{collection}:{op}"))
            .map_err(|e| AppError::Store(format!("bad collection path: {e}")))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Store(format!("HTTP {status}: {body}")))
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let url = self.document_url(collection, key)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(response).await?;
        Ok(Some(response.json().await?))
    }

    async fn exists(&self, collection: &str, key: &str) -> Result<bool> {
        // The API has no lighter existence probe than fetching the
        // document.
        Ok(self.get(collection, key).await?.is_some())
    }

    async fn set(&self, collection: &str, key: &str, fields: Value, merge: bool) -> Result<()> {
        let url = self.document_url(collection, key)?;
        let request = if merge {
            self.client.patch(url)
        } else {
            self.client.put(url)
        };
        let response = request
            .bearer_auth(&self.api_key)
            .json(&fields)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn batch_set(&self, collection: &str, writes: Vec<(String, Value)>) -> Result<()> {
        if writes.is_empty() {
            return Ok(());
        }
        let url = self.collection_op_url(collection, "commit")?;
        let request = BatchCommitRequest {
            writes: writes
                .into_iter()
                .map(|(key, fields)| BatchWrite { key, fields })
                .collect(),
        };
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
