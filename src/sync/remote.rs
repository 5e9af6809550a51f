use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::quote::Quote;

/// Errors that can end a sync cycle. None of them are retried.
#[derive(Debug)]
pub enum SyncError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The endpoint answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body did not have the expected shape.
    Parse(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Network(msg) => write!(f, "network error: {msg}"),
            SyncError::Api { status, message } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
            SyncError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SyncError {}

/// A generic remote record. Only `title` is used; every other field is ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RemoteRecord {
    pub title: String,
}

#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Returns the name of the remote, for logs.
    fn name(&self) -> &str;

    /// Fetches at most `limit` records.
    async fn fetch_records(&self, limit: usize) -> Result<Vec<RemoteRecord>, SyncError>;

    /// Submits one quote and returns the endpoint's acknowledgement body.
    async fn push_quote(&self, quote: &Quote) -> Result<serde_json::Value, SyncError>;
}
