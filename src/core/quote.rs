//! # Quote
//!
//! The atomic unit of content: a `(text, category)` pair.
//!
//! Quotes have no identity. Two quotes with the same text and category are
//! indistinguishable, and the store keeps both.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    EmptyText,
    EmptyCategory,
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::EmptyText => write!(f, "quote text must not be empty"),
            QuoteError::EmptyCategory => write!(f, "quote category must not be empty"),
        }
    }
}

impl std::error::Error for QuoteError {}

impl Quote {
    /// Builds a quote from raw input, trimming surrounding whitespace.
    pub fn new(text: &str, category: &str) -> Result<Self, QuoteError> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() {
            return Err(QuoteError::EmptyText);
        }
        if category.is_empty() {
            return Err(QuoteError::EmptyCategory);
        }
        Ok(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    /// Re-checks a quote that arrived through deserialization.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.text.trim().is_empty() {
            return Err(QuoteError::EmptyText);
        }
        if self.category.trim().is_empty() {
            return Err(QuoteError::EmptyCategory);
        }
        Ok(())
    }
}

/// The built-in list used when nothing valid is persisted.
pub fn seed_quotes() -> Vec<Quote> {
    [
        ("Love is a beautiful thing.", "Love"),
        ("Knowledge is power.", "Education"),
        ("A stitch in time saves nine.", "Motivation"),
    ]
    .into_iter()
    .map(|(text, category)| Quote {
        text: text.to_string(),
        category: category.to_string(),
    })
    .collect()
}
