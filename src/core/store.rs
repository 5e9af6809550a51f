//! # Quote Store
//!
//! Owns the canonical, ordered list of quotes and its persisted mirror.
//!
//! ```text
//! QuoteStore
//! ├── quotes: Vec<Quote>                 // insertion order, duplicates allowed
//! ├── selected: CategoryFilter           // last selected filter (persisted)
//! └── storage: Box<dyn KeyValueStore>    // "quotes" + "selectedCategory" keys
//! ```
//!
//! Every mutation persists the whole sequence under `quotes`. There is no
//! versioning and no partial write.

use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use crate::core::category::CategoryFilter;
use crate::core::quote::{Quote, QuoteError, seed_quotes};
use crate::core::storage::{FileStore, KeyValueStore, StorageError};

pub const QUOTES_KEY: &str = "quotes";
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

#[derive(Debug)]
pub enum StoreError {
    Invalid(QuoteError),
    Storage(StorageError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Invalid(e) => write!(f, "invalid quote: {e}"),
            StoreError::Storage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<QuoteError> for StoreError {
    fn from(e: QuoteError) -> Self {
        StoreError::Invalid(e)
    }
}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        StoreError::Storage(e)
    }
}

pub struct QuoteStore {
    quotes: Vec<Quote>,
    selected: CategoryFilter,
    storage: Box<dyn KeyValueStore>,
}

impl QuoteStore {
    /// Loads persisted quotes, or the seed set when nothing valid is stored.
    ///
    /// Stored data must be a JSON array of `{text, category}` objects with
    /// non-empty strings. Anything else is discarded with a warning.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let quotes = match storage.get(QUOTES_KEY) {
            Ok(Some(raw)) => match parse_quotes(&raw) {
                Some(quotes) => {
                    info!("Loaded {} quotes from storage", quotes.len());
                    quotes
                }
                None => {
                    warn!("Stored quotes are malformed, falling back to seed set");
                    seed_quotes()
                }
            },
            Ok(None) => {
                info!("No stored quotes, using seed set");
                seed_quotes()
            }
            Err(e) => {
                warn!("Failed to read stored quotes ({}), using seed set", e);
                seed_quotes()
            }
        };

        let selected = match storage.get(SELECTED_CATEGORY_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<CategoryFilter>(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed selected category: {}", e);
                CategoryFilter::All
            }),
            Ok(None) => CategoryFilter::All,
            Err(e) => {
                warn!("Failed to read selected category: {}", e);
                CategoryFilter::All
            }
        };

        Self {
            quotes,
            selected,
            storage,
        }
    }

    /// Loads from a file store rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        Ok(Self::load(Box::new(FileStore::open(dir)?)))
    }

    /// Starts from an explicit list without reading storage.
    pub fn with_quotes(storage: Box<dyn KeyValueStore>, quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            selected: CategoryFilter::All,
            storage,
        }
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected
    }

    pub fn save(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.quotes)?;
        self.storage.set(QUOTES_KEY, &json)?;
        debug!("Saved {} quotes", self.quotes.len());
        Ok(())
    }

    /// Validates and appends a new quote, then persists.
    ///
    /// On a storage failure the quote stays in memory and the error is returned.
    pub fn add(&mut self, text: &str, category: &str) -> Result<(), StoreError> {
        let quote = Quote::new(text, category)?;
        self.push(quote)
    }

    pub(crate) fn push(&mut self, quote: Quote) -> Result<(), StoreError> {
        self.quotes.push(quote);
        self.save()?;
        Ok(())
    }

    /// Appends every quote unconditionally, then persists.
    pub fn import_all(&mut self, quotes: Vec<Quote>) -> Result<(), StorageError> {
        info!("Importing {} quotes", quotes.len());
        self.quotes.extend(quotes);
        self.save()
    }

    /// Replaces the whole sequence, then persists.
    pub fn replace_all(&mut self, quotes: Vec<Quote>) -> Result<(), StorageError> {
        info!(
            "Replacing {} local quotes with {} quotes",
            self.quotes.len(),
            quotes.len()
        );
        self.quotes = quotes;
        self.save()
    }

    /// A snapshot of the full sequence, suitable for serialization.
    pub fn export_all(&self) -> Vec<Quote> {
        self.quotes.clone()
    }

    pub fn set_selected_category(&mut self, filter: CategoryFilter) -> Result<(), StorageError> {
        let json = serde_json::to_string(&filter)?;
        self.selected = filter;
        self.storage.set(SELECTED_CATEGORY_KEY, &json)
    }
}

fn parse_quotes(raw: &str) -> Option<Vec<Quote>> {
    let quotes: Vec<Quote> = serde_json::from_str(raw).ok()?;
    if quotes.iter().all(|q| q.validate().is_ok()) {
        Some(quotes)
    } else {
        None
    }
}
