//! HTTP remote backed by a JSONPlaceholder-style `/posts` resource.
//!
//! - `GET  {base}/posts?_limit=N` returns an array of records with a `title`
//! - `POST {base}/posts` echoes the submitted JSON body back with an `id`

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::core::quote::Quote;
use crate::sync::remote::{RemoteRecord, RemoteSource, SyncError};

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com";

pub struct HttpRemote {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }
}

/// Turns a non-success response into `SyncError::Api`.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SyncError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("Remote error: {} - {}", status, message);
    Err(SyncError::Api { status, message })
}

#[async_trait]
impl RemoteSource for HttpRemote {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch_records(&self, limit: usize) -> Result<Vec<RemoteRecord>, SyncError> {
        info!("Fetching up to {} records from {}", limit, self.posts_url());
        let response = self
            .client
            .get(self.posts_url())
            .query(&[("_limit", limit)])
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;
        debug!("Fetch response status: {}", response.status());

        let response = check_status(response).await?;
        let mut records: Vec<RemoteRecord> = response
            .json()
            .await
            .map_err(|e| SyncError::Parse(e.to_string()))?;
        records.truncate(limit);
        info!("Fetched {} records", records.len());
        Ok(records)
    }

    async fn push_quote(&self, quote: &Quote) -> Result<serde_json::Value, SyncError> {
        debug!("Posting quote in category '{}'", quote.category);
        let response = self
            .client
            .post(self.posts_url())
            .json(quote)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        let ack: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SyncError::Parse(e.to_string()))?;
        info!("Quote acknowledged by remote: {}", ack);
        Ok(ack)
    }
}
