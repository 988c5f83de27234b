//! Homework bot CLI
//!
//! Command-line interface for the homework review status watcher.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::{load_config, Config, Credentials, Secrets};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Homework review status watcher with Telegram notifications")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file (overrides config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seconds between status checks (overrides config file)
    #[arg(long)]
    retry_period: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "debug", value_parser = parse_log_level)]
    log_level: Level,
}

fn parse_log_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid log level: {}. Use: trace, debug, info, warn, error",
            s
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = if let Some(config_path) = &args.config {
        load_config(config_path)?
    } else {
        Config::default()
    };

    if let Some(log_file) = args.log_file {
        config.log_file = log_file;
    }
    if let Some(retry_period) = args.retry_period {
        config.retry_period_seconds = retry_period;
    }

    let directory = match config.log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = config
        .log_file
        .file_name()
        .ok_or_else(|| format!("Invalid log file path: {:?}", config.log_file))?;
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, _guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );

    // A missing .env is fine; real environment variables take precedence.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env loaded: {}", e);
    }

    let credentials = Credentials::try_from(Secrets::from_env())?;

    tracing::info!("Starting homework bot");
    tracing::debug!(
        "Endpoint: {}, retry period: {}s",
        config.endpoint,
        config.retry_period_seconds
    );

    homework_bot::run(config, credentials).await?;

    Ok(())
}
