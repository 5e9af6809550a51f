use clap::Parser;
use quotebook::cli::{Args, run_command};
use quotebook::core::config::{self, QuotebookConfig};
use quotebook::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to quotebook.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("quotebook.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}. Using defaults.");
        log::warn!("Config load failed: {}", e);
        QuotebookConfig::default()
    });
    let resolved = config::resolve(&file_config, &args.overrides());

    log::info!(
        "Quotebook starting up (data dir: {}, sync: {}, policy: {})",
        resolved.data_dir.display(),
        resolved.sync_enabled,
        resolved.policy.label()
    );

    match args.command {
        Some(command) => {
            if let Err(e) = run_command(command, &resolved).await {
                log::warn!("Command failed: {}", e);
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        None => tui::run(resolved),
    }
}
