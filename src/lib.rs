//! Quotebook library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod cli;
pub mod core;
pub mod sync;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How a sync cycle reconciles local quotes with the remote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncPolicy {
    /// Replace every local quote with the fetched batch.
    #[default]
    Replace,
    /// Append the fetched batch to the local quotes.
    Append,
    /// Post local quotes that don't carry the synced category.
    PushUnsynced,
}

impl SyncPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }

    pub fn label(&self) -> &'static str {
        match self {
            SyncPolicy::Replace => "replace",
            SyncPolicy::Append => "append",
            SyncPolicy::PushUnsynced => "push-unsynced",
        }
    }
}
