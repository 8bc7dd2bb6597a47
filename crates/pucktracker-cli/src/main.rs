//! PuckTracker - renders league standings to an HTML page.
//!
//! Shows cached standings immediately when available, fetches fresh ones,
//! and reloads everything once a day. Pass `--once` to run a single cycle.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pucktracker_core::{
    ApiClient, CacheManager, Config, HtmlFileTarget, LoadState, StandingsLoader,
};

/// Log file prefix inside the cache directory
const LOG_FILE_PREFIX: &str = "pucktracker.log";

/// Initialize the tracing subscriber for logging.
/// Logs go to stderr and to a daily-rolling file in `log_dir`.
fn init_tracing(log_dir: &Path) -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    let once = args.iter().skip(1).any(|a| a == "--once");

    let config = Config::load().context("Failed to load configuration")?;
    let cache_dir = config.cache_dir()?;
    let output_path = config.output_path()?;

    std::fs::create_dir_all(&cache_dir)
        .with_context(|| format!("Failed to create {}", cache_dir.display()))?;
    let _log_guard = init_tracing(&cache_dir);
    info!(
        api = config.api_base_url(),
        output = %output_path.display(),
        "PuckTracker starting"
    );

    let client = ApiClient::new(config.api_base_url())?;
    let cache = CacheManager::new(cache_dir);
    if let Some(age) = cache.snapshot_age_display() {
        info!(age = %age, "Found cached standings");
    }
    let target = HtmlFileTarget::new(output_path);
    let mut loader = StandingsLoader::new(client, cache, target);

    if once {
        let state = loader.load().await;
        eprintln!("{:?}: {}", state, loader.target().path().display());
        if state == LoadState::Failed {
            anyhow::bail!("No standings available");
        }
        return Ok(());
    }

    loader.run().await;
    Ok(())
}
