//! # Export / Import
//!
//! JSON files holding an array of `{text, category}` objects.
//!
//! Import is all-or-nothing: one bad element rejects the whole file.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::info;

use crate::core::action::{Action, update};
use crate::core::notification::Notification;
use crate::core::quote::{Quote, QuoteError};
use crate::core::state::App;

#[derive(Debug)]
pub enum TransferError {
    Io(io::Error),
    Parse(serde_json::Error),
    InvalidQuote { index: usize, error: QuoteError },
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Io(e) => write!(f, "file error: {e}"),
            TransferError::Parse(e) => write!(f, "not a JSON array of quotes: {e}"),
            TransferError::InvalidQuote { index, error } => {
                write!(f, "quote #{} is invalid: {error}", index + 1)
            }
        }
    }
}

impl std::error::Error for TransferError {}

pub fn export_to_file(path: &Path, quotes: &[Quote]) -> Result<(), TransferError> {
    let json = serde_json::to_string_pretty(quotes).map_err(TransferError::Parse)?;
    fs::write(path, json).map_err(TransferError::Io)?;
    info!("Exported {} quotes to {}", quotes.len(), path.display());
    Ok(())
}

pub fn import_from_file(path: &Path) -> Result<Vec<Quote>, TransferError> {
    let contents = fs::read_to_string(path).map_err(TransferError::Io)?;
    let quotes = parse_quotes(&contents)?;
    info!("Read {} quotes from {}", quotes.len(), path.display());
    Ok(quotes)
}

pub fn parse_quotes(contents: &str) -> Result<Vec<Quote>, TransferError> {
    let quotes: Vec<Quote> = serde_json::from_str(contents).map_err(TransferError::Parse)?;
    for (index, quote) in quotes.iter().enumerate() {
        quote
            .validate()
            .map_err(|error| TransferError::InvalidQuote { index, error })?;
    }
    Ok(quotes)
}

/// Writes the whole store to `path` and reports the outcome to the user.
pub fn export_store(app: &mut App, path: &Path) -> Result<usize, TransferError> {
    let quotes = app.store.export_all();
    match export_to_file(path, &quotes) {
        Ok(()) => {
            app.notify(Notification::info(format!(
                "Exported {} quotes to {}.",
                quotes.len(),
                path.display()
            )));
            Ok(quotes.len())
        }
        Err(e) => {
            app.notify(Notification::error(format!("Export failed: {e}")));
            Err(e)
        }
    }
}

/// Reads `path` and appends its quotes, or reports why nothing was imported.
pub fn import_into(app: &mut App, path: &Path) -> Result<usize, TransferError> {
    match import_from_file(path) {
        Ok(quotes) => {
            let count = quotes.len();
            update(app, Action::ImportQuotes(quotes));
            Ok(count)
        }
        Err(e) => {
            app.notify(Notification::error(format!("Import failed: {e}")));
            Err(e)
        }
    }
}
