//! Souq-Sift main entry point
//!
//! This is the command-line interface for the Souq-Sift catalog harvester.

use clap::Parser;
use std::path::PathBuf;
use souq_sift::config::load_config_with_hash;
use souq_sift::crawler::run_harvest_with_cancellation;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Souq-Sift: a product-catalog harvester
///
/// Souq-Sift crawls a paginated product-catalog API, normalizes and
/// deduplicates the records, persists them idempotently to SQLite, and
/// archives the raw API responses for replay.
#[derive(Parser, Debug)]
#[command(name = "souq-sift")]
#[command(version = "1.0.0")]
#[command(about = "A product-catalog harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the harvest plan without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show row counts from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_harvest(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("souq_sift=info,warn"),
            1 => EnvFilter::new("souq_sift=debug,info"),
            2 => EnvFilter::new("souq_sift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the harvest plan
fn handle_dry_run(config: &souq_sift::config::Config, config_hash: &str) {
    println!("=== Souq-Sift Dry Run ===\n");

    println!("API:");
    println!("  Endpoint: {}", config.api.base_url);
    println!("  Page size: {}", config.api.page_size);
    println!("  Request timeout: {}s", config.api.request_timeout_secs);

    println!("\nCrawl:");
    println!("  Category: {}", config.crawl.category);
    println!(
        "  Timezone offset: GMT{:+}",
        config.crawl.timezone_offset_hours
    );
    if let Some(store) = &config.crawl.store {
        println!("  Store label: {}", store);
    }
    println!("  Track stock: {}", config.crawl.track_stock);

    println!("\nRetry:");
    println!("  Max attempts per offset: {}", config.retry.max_attempts);
    println!("  Delay between attempts: {}s", config.retry.delay_secs);

    println!("\nOutput:");
    println!(
        "  Database: {} (table {})",
        config.output.database_path, config.output.table
    );
    println!("  Archive: {}", config.output.archive_path);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
    println!(
        "✓ Would harvest category '{}' starting at offset 0",
        config.crawl.category
    );
}

/// Handles the --stats mode: shows row counts from the database
fn handle_stats(config: &souq_sift::config::Config) -> anyhow::Result<()> {
    use souq_sift::storage::{open_store, ProductStore};
    use std::path::Path;

    println!(
        "Database: {} (table {})\n",
        config.output.database_path, config.output.table
    );

    let store = open_store(
        Path::new(&config.output.database_path),
        &config.output.table,
    )?;

    println!("Total rows: {}", store.count_rows()?);
    for (category, count) in store.category_breakdown()? {
        println!("  {}: {}", category, count);
    }

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: souq_sift::config::Config) -> anyhow::Result<()> {
    // Ctrl-C stops the crawl before its next page fetch.
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling harvest");
            signal_token.cancel();
        }
    });

    match run_harvest_with_cancellation(config, cancel).await {
        Ok(report) => {
            tracing::info!(
                "Harvest completed: {} pages, {} unique products, {} new rows, {} faults retried",
                report.pages_fetched,
                report.unique_products,
                report.rows_inserted,
                report.faults_retried
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
