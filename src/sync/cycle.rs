//! # Sync Cycle
//!
//! One execution of the configured policy against a `RemoteSource`.
//!
//! ```text
//! App (Idle) ──plan()──▶ SyncJob ──run_cycle()──▶ SyncOutcome ──update()──▶ App (Idle)
//!                                       │
//!                                       └── SyncError ──▶ one notification
//! ```
//!
//! The cycle never touches the store. It works on a snapshot taken by
//! `SyncJob::plan` and hands its result back as a `SyncOutcome`; the event
//! loop applies the outcome.

use log::{debug, info};

use crate::SyncPolicy;
use crate::core::quote::Quote;
use crate::sync::remote::{RemoteRecord, RemoteSource, SyncError};

#[derive(Debug, Clone, PartialEq)]
pub struct SyncJob {
    pub policy: SyncPolicy,
    pub batch_size: usize,
    pub category_label: String,
    /// Quotes to submit (only populated for `PushUnsynced`).
    pub outgoing: Vec<Quote>,
}

impl SyncJob {
    pub fn plan(
        policy: SyncPolicy,
        quotes: &[Quote],
        batch_size: usize,
        category_label: &str,
    ) -> Self {
        let outgoing = match policy {
            SyncPolicy::PushUnsynced => quotes
                .iter()
                .filter(|q| q.category != category_label)
                .cloned()
                .collect(),
            SyncPolicy::Replace | SyncPolicy::Append => Vec::new(),
        };
        Self {
            policy,
            batch_size,
            category_label: category_label.to_string(),
            outgoing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Remote wins: the store becomes exactly these quotes.
    Replace(Vec<Quote>),
    /// These quotes are appended to the store.
    Append(Vec<Quote>),
    /// This many quotes were acknowledged by the remote.
    Pushed { sent: usize },
}

/// Maps remote records to quotes under one category label.
/// Records with a blank title are dropped.
pub fn map_records(records: Vec<RemoteRecord>, category_label: &str) -> Vec<Quote> {
    records
        .into_iter()
        .filter_map(|record| match Quote::new(&record.title, category_label) {
            Ok(quote) => Some(quote),
            Err(e) => {
                debug!("Skipping remote record: {}", e);
                None
            }
        })
        .collect()
}

pub async fn run_cycle(remote: &dyn RemoteSource, job: &SyncJob) -> Result<SyncOutcome, SyncError> {
    info!("Sync cycle starting: policy={:?}, remote={}", job.policy, remote.name());
    match job.policy {
        SyncPolicy::Replace => {
            let records = remote.fetch_records(job.batch_size).await?;
            Ok(SyncOutcome::Replace(map_records(records, &job.category_label)))
        }
        SyncPolicy::Append => {
            let records = remote.fetch_records(job.batch_size).await?;
            Ok(SyncOutcome::Append(map_records(records, &job.category_label)))
        }
        SyncPolicy::PushUnsynced => {
            // Sequential: each response is awaited before the next request.
            for quote in &job.outgoing {
                remote.push_quote(quote).await?;
            }
            Ok(SyncOutcome::Pushed {
                sent: job.outgoing.len(),
            })
        }
    }
}
