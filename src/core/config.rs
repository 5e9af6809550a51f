//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.quotebook/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::SyncPolicy;
use crate::sync::DEFAULT_ENDPOINT;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QuotebookConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub data_dir: Option<String>,
    pub export_path: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SyncConfig {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub policy: Option<SyncPolicy>,
    pub interval_secs: Option<u64>,
    pub batch_size: Option<usize>,
    pub category_label: Option<String>,
    pub push_on_add: Option<bool>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 300;
/// One week. Longer periods are clamped so the timer deadline stays representable.
pub const MAX_SYNC_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_CATEGORY_LABEL: &str = "Server";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EXPORT_PATH: &str = "quotes.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub export_path: PathBuf,
    pub sync_enabled: bool,
    pub endpoint: String,
    pub policy: SyncPolicy,
    pub sync_interval: Duration,
    pub batch_size: usize,
    pub category_label: String,
    pub push_on_add: bool,
    pub request_timeout: Duration,
}

/// Values passed on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub policy: Option<SyncPolicy>,
    pub interval_secs: Option<u64>,
    pub no_sync: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.quotebook/`.
pub fn quotebook_home() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".quotebook"))
}

/// Returns the path to `~/.quotebook/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    quotebook_home().map(|h| h.join("config.toml"))
}

/// Load config from `~/.quotebook/config.toml`.
pub fn load_config() -> Result<QuotebookConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(QuotebookConfig::default())
        }
    }
}

/// If the file doesn't exist, generates a commented-out default and
/// returns `QuotebookConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<QuotebookConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(QuotebookConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: QuotebookConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Quotebook Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# data_dir = "/home/me/.quotebook/data"     # Or set QUOTEBOOK_DATA_DIR
# export_path = "quotes.json"

# [sync]
# enabled = true
# endpoint = "https://jsonplaceholder.typicode.com"   # Or set QUOTEBOOK_ENDPOINT
# policy = "replace"                  # "replace", "append", "push-unsynced"
# interval_secs = 300                 # Or set QUOTEBOOK_SYNC_INTERVAL
# batch_size = 10
# category_label = "Server"
# push_on_add = false
# timeout_secs = 30
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Environment lookups used by `resolve`. Split out so tests don't touch
/// the process environment.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &QuotebookConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, &ProcessEnv)
}

pub fn resolve_with_env(
    config: &QuotebookConfig,
    cli: &CliOverrides,
    env: &dyn EnvSource,
) -> ResolvedConfig {
    // Data dir: CLI → env → config → ~/.quotebook/data → ./.quotebook/data
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| env.var("QUOTEBOOK_DATA_DIR").map(PathBuf::from))
        .or_else(|| config.general.data_dir.as_ref().map(PathBuf::from))
        .or_else(crate::core::storage::default_data_dir)
        .unwrap_or_else(|| PathBuf::from(".quotebook").join("data"));

    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| env.var("QUOTEBOOK_ENDPOINT"))
        .or_else(|| config.sync.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let policy = cli
        .policy
        .or_else(|| {
            env.var("QUOTEBOOK_SYNC_POLICY").and_then(|v| {
                let parsed = SyncPolicy::parse(&v);
                if parsed.is_none() {
                    warn!("Ignoring unknown QUOTEBOOK_SYNC_POLICY '{}'", v);
                }
                parsed
            })
        })
        .or(config.sync.policy)
        .unwrap_or_default();

    let interval_secs = cli
        .interval_secs
        .or_else(|| env.var("QUOTEBOOK_SYNC_INTERVAL").and_then(|v| v.parse().ok()))
        .or(config.sync.interval_secs)
        .unwrap_or(DEFAULT_SYNC_INTERVAL_SECS)
        .clamp(1, MAX_SYNC_INTERVAL_SECS);

    ResolvedConfig {
        data_dir,
        export_path: config
            .general
            .export_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH)),
        sync_enabled: !cli.no_sync && config.sync.enabled.unwrap_or(true),
        endpoint,
        policy,
        sync_interval: Duration::from_secs(interval_secs),
        batch_size: config.sync.batch_size.unwrap_or(DEFAULT_BATCH_SIZE).max(1),
        category_label: config
            .sync
            .category_label
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY_LABEL.to_string()),
        push_on_add: config.sync.push_on_add.unwrap_or(false),
        request_timeout: Duration::from_secs(
            config.sync.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1),
        ),
    }
}
