//! # Command Line
//!
//! Argument parsing and the headless commands. With no subcommand the binary
//! starts the TUI; every subcommand runs once against the same store and
//! exits.
//!
//! Headless commands reuse `update()` so they behave exactly like the TUI.
//! Notifications are printed instead of shown in a banner: info on stdout,
//! warnings and errors on stderr.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{info, warn};

use crate::SyncPolicy;
use crate::core::action::{Action, Effect, update};
use crate::core::category::{CategoryFilter, apply_filter};
use crate::core::config::{CliOverrides, ResolvedConfig};
use crate::core::form::MISSING_FIELDS_MESSAGE;
use crate::core::notification::{Notification, NotificationLevel};
use crate::core::quote::Quote;
use crate::core::render::{NO_QUOTES_RANDOM_MESSAGE, pick_random, render_many, render_one};
use crate::core::state::App;
use crate::core::storage::StorageError;
use crate::core::store::QuoteStore;
use crate::core::transfer::{TransferError, export_store, import_into};
use crate::sync::{HttpRemote, RemoteSource, SyncError, run_cycle};

#[derive(Parser, Debug)]
#[command(name = "quotebook", about = "Quote collection with remote sync")]
pub struct Args {
    /// Directory holding quotes.json and selectedCategory.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the sync endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// How a sync cycle reconciles local and remote quotes
    #[arg(long, value_enum, global = true)]
    pub policy: Option<SyncPolicy>,

    /// Seconds between automatic sync cycles
    #[arg(long, global = true)]
    pub interval: Option<u64>,

    /// Disable remote sync entirely
    #[arg(long, global = true)]
    pub no_sync: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print every quote, optionally restricted to one category
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Print one random quote
    Random {
        #[arg(long)]
        category: Option<String>,
    },
    /// Print the distinct categories
    Categories,
    /// Add a quote
    Add { text: String, category: String },
    /// Write all quotes to a JSON file
    Export { path: Option<PathBuf> },
    /// Append quotes from a JSON file
    Import { path: PathBuf },
    /// Run one sync cycle now
    Sync,
}

impl Args {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            data_dir: self.data_dir.clone(),
            endpoint: self.endpoint.clone(),
            policy: self.policy,
            interval_secs: self.interval,
            no_sync: self.no_sync,
        }
    }
}

#[derive(Debug)]
pub enum CliError {
    Storage(StorageError),
    Transfer(TransferError),
    Sync(SyncError),
    Rejected(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Storage(e) => write!(f, "storage error: {e}"),
            CliError::Transfer(e) => write!(f, "{e}"),
            CliError::Sync(e) => write!(f, "sync failed: {e}"),
            CliError::Rejected(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        CliError::Storage(e)
    }
}

impl From<TransferError> for CliError {
    fn from(e: TransferError) -> Self {
        CliError::Transfer(e)
    }
}

impl From<SyncError> for CliError {
    fn from(e: SyncError) -> Self {
        CliError::Sync(e)
    }
}

/// Runs one headless command against the configured store.
pub async fn run_command(command: Command, config: &ResolvedConfig) -> Result<(), CliError> {
    info!("Running command: {:?}", command);
    let store = QuoteStore::open(&config.data_dir)?;
    let mut app = App::from_config(store, config);
    let remote = if config.sync_enabled {
        Some(HttpRemote::new(config.endpoint.clone(), config.request_timeout)?)
    } else {
        None
    };

    let remote = remote.as_ref().map(|r| r as &dyn RemoteSource);
    let result = execute(command, &mut app, remote, &config.export_path).await;
    print_notifications(&mut app);
    result
}

async fn execute(
    command: Command,
    app: &mut App,
    remote: Option<&dyn RemoteSource>,
    default_export: &Path,
) -> Result<(), CliError> {
    let width = output_width();
    match command {
        Command::List { category } => {
            let filter = cli_filter(app, category.as_deref());
            let visible = apply_filter(app.store.quotes(), &filter);
            println!("{}", wrap_lines(&render_many(&visible), width));
        }
        Command::Random { category } => {
            let filter = cli_filter(app, category.as_deref());
            let visible = apply_filter(app.store.quotes(), &filter);
            match pick_random(&visible, &mut rand::rng()) {
                Some(quote) => println!("{}", wrap_lines(&render_one(quote), width)),
                None => println!("{NO_QUOTES_RANDOM_MESSAGE}"),
            }
        }
        Command::Categories => {
            for category in &app.categories {
                println!("{category}");
            }
        }
        Command::Add { text, category } => {
            let quote = Quote::new(&text, &category).map_err(|e| {
                app.notify(Notification::error(MISSING_FIELDS_MESSAGE));
                CliError::Rejected(e.to_string())
            })?;
            let effect = update(app, Action::AddQuote(quote));
            apply_effect(app, remote, effect).await;
        }
        Command::Export { path } => {
            let path = path.unwrap_or_else(|| default_export.to_path_buf());
            export_store(app, &path)?;
        }
        Command::Import { path } => {
            import_into(app, &path)?;
        }
        Command::Sync => {
            let Some(remote) = remote else {
                return Err(CliError::Rejected("sync is disabled".to_string()));
            };
            let job = match update(app, Action::SyncRequested) {
                Effect::SpawnSync(job) => job,
                other => {
                    warn!("Unexpected effect for sync request: {:?}", other);
                    return Ok(());
                }
            };
            match run_cycle(remote, &job).await {
                Ok(outcome) => {
                    let effect = update(app, Action::SyncCompleted(outcome));
                    apply_effect(app, Some(remote), effect).await;
                }
                Err(e) => {
                    update(app, Action::SyncFailed(e.to_string()));
                    return Err(CliError::Sync(e));
                }
            }
        }
    }
    Ok(())
}

/// Headless commands have no background tasks; effects run inline.
async fn apply_effect(app: &mut App, remote: Option<&dyn RemoteSource>, effect: Effect) {
    let Effect::PushQuotes(quotes) = effect else {
        return;
    };
    let Some(remote) = remote else {
        return;
    };
    for quote in &quotes {
        let action = match remote.push_quote(quote).await {
            Ok(_) => Action::QuotePushed,
            Err(e) => Action::QuotePushFailed(e.to_string()),
        };
        update(app, action);
    }
}

/// An explicit `--category` is used as given; otherwise the persisted selection applies.
fn cli_filter(app: &App, category: Option<&str>) -> CategoryFilter {
    match category {
        Some(name) => CategoryFilter::parse(name),
        None => app.filter.clone(),
    }
}

fn output_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80)
        .max(20)
}

/// Wraps each line independently, indenting continuation lines.
fn wrap_lines(text: &str, width: usize) -> String {
    let options = textwrap::Options::new(width).subsequent_indent("  ");
    text.lines()
        .map(|line| textwrap::fill(line, &options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_notifications(app: &mut App) {
    for notification in app.take_notifications() {
        match notification.level {
            NotificationLevel::Info => println!("{}", notification.message),
            NotificationLevel::Warn | NotificationLevel::Error => {
                eprintln!("{}", notification.message)
            }
        }
    }
}
