//! # Remote Sync
//!
//! Reconciles the quote store with a remote endpoint using exactly one
//! `SyncPolicy` per cycle.
//!
//! ```text
//!            timer tick / manual trigger
//!   ┌──────┐ ───────────────────────────▶ ┌─────────┐
//!   │ Idle │                              │ Syncing │
//!   └──────┘ ◀─────────────────────────── └─────────┘
//!              completion (ok or error)
//! ```
//!
//! There is no error state: a failed cycle reports once and returns to Idle.
//!
//! ## Modules
//!
//! - [`remote`]: the `RemoteSource` trait and `SyncError`
//! - [`http`]: `HttpRemote`, the reqwest-backed implementation
//! - [`cycle`]: `SyncJob`, `SyncOutcome` and `run_cycle()`
//! - [`scheduler`]: the cancellable periodic trigger

pub mod cycle;
pub mod http;
pub mod remote;
pub mod scheduler;

pub use cycle::{SyncJob, SyncOutcome, map_records, run_cycle};
pub use http::{DEFAULT_ENDPOINT, HttpRemote};
pub use remote::{RemoteRecord, RemoteSource, SyncError};
pub use scheduler::SyncScheduler;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Idle,
    Syncing,
}

impl SyncState {
    pub fn label(&self) -> &'static str {
        match self {
            SyncState::Idle => "idle",
            SyncState::Syncing => "syncing",
        }
    }
}
