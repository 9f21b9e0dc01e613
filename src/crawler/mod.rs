//! Crawler module for paginated catalog harvesting
//!
//! This module contains the core crawl logic, including:
//! - HTTP page fetching against the paginated search endpoint
//! - The bounded fixed-delay retry policy
//! - The crawl controller driving fetch/extract/dedupe/accumulate
//! - End-of-run hand-off to the persistence and archive sinks

mod controller;
mod fetcher;
mod retry;

pub use controller::{run_harvest, run_harvest_with_cancellation, Controller, CrawlOutcome};
pub use fetcher::{build_http_client, fetch_page, CatalogPage, TransportFault};
pub use retry::RetryPolicy;
