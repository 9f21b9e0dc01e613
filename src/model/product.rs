//! Canonical product record and raw source record types

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// An untyped product record as delivered by the catalog API.
///
/// Every field is optional; the extractor tolerates anything missing or of
/// an unexpected shape and substitutes documented sentinels.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A normalized product record, ready for persistence.
///
/// `link` is the natural identity: it is unique per product and is the
/// conflict target for idempotent inserts. All other string fields fall
/// back to sentinel values when the source record omits them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub specs: String,
    pub new_price: f64,
    pub old_price: f64,
    pub brand: String,
    pub link: String,
    /// Fixed per crawl run, never derived from the record.
    pub category: String,
    /// Wall-clock time of the page fetch, in the configured fixed offset.
    pub timestamp: DateTime<FixedOffset>,
    /// In-stock flag, only populated when the deployment variant tracks it.
    pub stock: Option<bool>,
    /// Store label, only populated when the deployment variant sets one.
    pub store: Option<String>,
}

/// Summary of a completed harvest run
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    /// Pages fetched successfully (including the terminal empty page, if any)
    pub pages_fetched: u64,

    /// Hits seen across all pages, before deduplication
    pub hits_seen: u64,

    /// Unique products accumulated after in-run deduplication
    pub unique_products: u64,

    /// Rows actually inserted by the store (conflicting links are skipped)
    pub rows_inserted: u64,

    /// Transport faults that were retried during the run
    pub faults_retried: u64,
}
