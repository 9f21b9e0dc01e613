//! Crawl controller - the fetch/extract/dedupe/accumulate loop
//!
//! The controller drives one crawl run to termination:
//! - fetches pages serially (each termination check depends on the
//!   previous page's reported total, so pagination cannot be parallelized)
//! - retries transport faults at the same offset under a bounded policy
//! - extracts and deduplicates every hit into the run's `CrawlState`
//! - hands the accumulated results to the persistence and archive sinks
//!   exactly once, after the loop terminates

use crate::archive::write_archive;
use crate::config::Config;
use crate::crawler::{build_http_client, fetch_page, RetryPolicy};
use crate::extract::{extract, ExtractContext};
use crate::model::{HarvestReport, Product};
use crate::state::{CrawlPhase, CrawlState};
use crate::storage::{ProductStore, SqliteStore};
use crate::{ConfigError, SiftError};
use chrono::{FixedOffset, Utc};
use reqwest::Client;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// The accumulated results of a terminated crawl loop
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Terminal controller phase (`Done` on the success path)
    pub phase: CrawlPhase,

    /// Unique products in discovery order
    pub products: Vec<Product>,

    /// Raw page payloads in fetch order
    pub raw_pages: Vec<serde_json::Value>,

    /// Hits seen before deduplication
    pub hits_seen: u64,

    /// Transport faults that were retried
    pub faults_retried: u64,
}

/// Drives one crawl run across the paginated catalog
pub struct Controller {
    config: Config,
    client: Client,
    policy: RetryPolicy,
    state: CrawlState,
    timezone: FixedOffset,
    cancel: CancellationToken,
    faults_retried: u64,
}

impl Controller {
    /// Creates a controller for one crawl run
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Controller)` - Ready to run
    /// * `Err(SiftError)` - The HTTP client could not be built
    pub fn new(config: Config) -> crate::Result<Self> {
        Self::with_cancellation(config, CancellationToken::new())
    }

    /// Creates a controller whose run can be cancelled externally
    ///
    /// The token is checked before every page fetch and during retry
    /// delays; a cancelled run terminates without persisting anything.
    pub fn with_cancellation(config: Config, cancel: CancellationToken) -> crate::Result<Self> {
        let client = build_http_client(&config.api)?;
        let policy = RetryPolicy::from_config(&config.retry);

        let timezone = FixedOffset::east_opt(config.crawl.timezone_offset_hours * 3600)
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "timezone-offset-hours out of range: {}",
                    config.crawl.timezone_offset_hours
                ))
            })?;

        Ok(Self {
            config,
            client,
            policy,
            state: CrawlState::new(),
            timezone,
            cancel,
            faults_retried: 0,
        })
    }

    /// Runs the crawl loop to termination
    ///
    /// Terminates with `Done` when a page comes back with no hits or the
    /// accumulated count reaches the reported total, and with `Failed` when
    /// the retry budget is exhausted or the run is cancelled. The offset
    /// advances by the fixed page size regardless of how many hits on a
    /// page were duplicates; duplicates still consume a page slot, which is
    /// what ties termination to the API's reported total.
    pub async fn run(mut self) -> crate::Result<CrawlOutcome> {
        tracing::info!(
            "Starting crawl for category '{}' at {}",
            self.config.crawl.category,
            self.config.api.base_url
        );

        let mut attempts: u32 = 0;

        loop {
            if self.cancel.is_cancelled() {
                return self.cancelled();
            }

            let offset = self.state.offset;
            let page = match fetch_page(&self.client, &self.config.api.base_url, offset).await {
                Ok(page) => {
                    attempts = 0;
                    page
                }
                Err(fault) => {
                    attempts += 1;
                    if !self.policy.allows_retry(attempts) {
                        self.state.phase = CrawlPhase::Failed;
                        tracing::error!(
                            "Giving up at offset {} after {} attempts: {}",
                            offset,
                            attempts,
                            fault
                        );
                        return Err(SiftError::RetriesExhausted {
                            offset,
                            attempts,
                            source: fault,
                        });
                    }

                    self.faults_retried += 1;
                    tracing::warn!(
                        "Fetch failed at offset {} (attempt {}/{}): {}; retrying in {:?}",
                        offset,
                        attempts,
                        self.policy.max_attempts,
                        fault,
                        self.policy.delay
                    );

                    tokio::select! {
                        _ = self.cancel.cancelled() => return self.cancelled(),
                        _ = tokio::time::sleep(self.policy.delay) => {}
                    }

                    // Same offset, next attempt.
                    continue;
                }
            };

            // Archive every fetched payload, including the terminal empty
            // page and pages whose hits all turn out to be duplicates.
            let total = page.total;
            let hit_count = page.hits.len();
            self.state.record_page(page.payload);

            if hit_count == 0 {
                tracing::info!("No hits at offset {}; catalog exhausted", offset);
                break;
            }

            // One clock read per page; sub-second ordering within a page
            // does not matter and a long crawl should not skew timestamps.
            let ctx = ExtractContext {
                category: self.config.crawl.category.clone(),
                product_base_url: self.config.api.product_base_url.clone(),
                store: self.config.crawl.store.clone(),
                track_stock: self.config.crawl.track_stock,
                now: Utc::now().with_timezone(&self.timezone),
            };

            let mut admitted = 0usize;
            for record in &page.hits {
                if self.state.admit(extract(record, &ctx)) {
                    admitted += 1;
                }
            }

            tracing::debug!(
                "Offset {}: {} hits, {} new, {}/{} accumulated",
                offset,
                hit_count,
                admitted,
                self.state.unique_count(),
                total
            );

            if self.state.unique_count() >= total {
                tracing::info!("Accumulated all {} reported products", total);
                break;
            }

            self.state.offset += self.config.api.page_size;
        }

        self.state.phase = CrawlPhase::Done;
        tracing::info!(
            "Crawl {}: {} pages, {} hits, {} unique products",
            self.state.phase,
            self.state.raw_pages.len(),
            self.state.hits_seen,
            self.state.unique_count()
        );

        Ok(CrawlOutcome {
            phase: self.state.phase,
            hits_seen: self.state.hits_seen,
            faults_retried: self.faults_retried,
            products: self.state.products,
            raw_pages: self.state.raw_pages,
        })
    }

    fn cancelled(mut self) -> crate::Result<CrawlOutcome> {
        self.state.phase = CrawlPhase::Failed;
        tracing::warn!("Crawl cancelled at offset {}", self.state.offset);
        Err(SiftError::Cancelled {
            offset: self.state.offset,
        })
    }
}

/// Runs a complete harvest: crawl, persist, archive
///
/// The sinks run exactly once each, after the crawl loop terminates.
/// Persistence runs first; a storage error surfaces before the archive is
/// touched, while an archive error surfaces after the rows are already
/// committed (the archive is best-effort relative to the store).
pub async fn run_harvest(config: Config) -> crate::Result<HarvestReport> {
    run_harvest_with_cancellation(config, CancellationToken::new()).await
}

/// Runs a complete harvest that can be cancelled externally
///
/// Cancellation terminates the crawl before its next fetch; nothing is
/// persisted or archived for a cancelled run.
pub async fn run_harvest_with_cancellation(
    config: Config,
    cancel: CancellationToken,
) -> crate::Result<HarvestReport> {
    let started = std::time::Instant::now();

    let controller = Controller::with_cancellation(config.clone(), cancel)?;
    let outcome = controller.run().await?;

    let mut store = SqliteStore::open(
        Path::new(&config.output.database_path),
        &config.output.table,
    )?;
    let rows_inserted = store.insert_products(&outcome.products)? as u64;
    tracing::info!(
        "Persisted {} of {} products ({} already present)",
        rows_inserted,
        outcome.products.len(),
        outcome.products.len() as u64 - rows_inserted
    );

    write_archive(Path::new(&config.output.archive_path), &outcome.raw_pages)?;
    tracing::info!(
        "Archived {} raw pages to {}",
        outcome.raw_pages.len(),
        config.output.archive_path
    );

    let report = HarvestReport {
        pages_fetched: outcome.raw_pages.len() as u64,
        hits_seen: outcome.hits_seen,
        unique_products: outcome.products.len() as u64,
        rows_inserted,
        faults_retried: outcome.faults_retried,
    };

    tracing::info!(
        "Harvest finished in {:.2?}: {} unique products, {} new rows",
        started.elapsed(),
        report.unique_products,
        report.rows_inserted
    );

    Ok(report)
}
