//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::quote::Quote;
use crate::core::state::{App, SyncSettings};
use crate::core::storage::MemoryStore;
use crate::core::store::QuoteStore;
use crate::sync::{RemoteRecord, RemoteSource, SyncError};

/// A scripted remote for tests that don't need real HTTP.
pub struct StubRemote {
    titles: Vec<String>,
    fail: bool,
    pushed: Mutex<Vec<Quote>>,
}

impl StubRemote {
    pub fn with_titles(titles: &[&str]) -> Self {
        Self {
            titles: titles.iter().map(|t| t.to_string()).collect(),
            fail: false,
            pushed: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_titles(&[])
        }
    }

    pub fn pushed(&self) -> Vec<Quote> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for StubRemote {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_records(&self, limit: usize) -> Result<Vec<RemoteRecord>, SyncError> {
        if self.fail {
            return Err(SyncError::Network("connection refused".to_string()));
        }
        Ok(self
            .titles
            .iter()
            .take(limit)
            .map(|title| RemoteRecord {
                title: title.clone(),
            })
            .collect())
    }

    async fn push_quote(&self, quote: &Quote) -> Result<serde_json::Value, SyncError> {
        if self.fail {
            return Err(SyncError::Network("connection refused".to_string()));
        }
        self.pushed.lock().unwrap().push(quote.clone());
        Ok(serde_json::json!({ "id": 101 }))
    }
}

pub fn quote(text: &str, category: &str) -> Quote {
    Quote::new(text, category).unwrap()
}

/// Creates a test App over in-memory storage, starting from the seed set.
pub fn test_app() -> App {
    App::new(
        QuoteStore::load(Box::new(MemoryStore::new())),
        SyncSettings::default(),
    )
}

/// Creates a test App over in-memory storage with the given quotes.
pub fn test_app_with(quotes: Vec<Quote>) -> App {
    App::new(
        QuoteStore::with_quotes(Box::new(MemoryStore::new()), quotes),
        SyncSettings::default(),
    )
}
