//! Transient accumulation state for one crawl run
//!
//! A `CrawlState` is created at run start, mutated only by its controller,
//! and discarded after the terminal persistence and archive steps. The
//! seen-key set lives here explicitly rather than as a mutable set closed
//! over the crawl loop, so concurrent runs can never share it.

use crate::extract::{dedup_key, DedupKey};
use crate::model::Product;
use crate::state::CrawlPhase;
use std::collections::HashSet;

/// Per-run pagination and accumulation state
#[derive(Debug)]
pub struct CrawlState {
    /// Current pagination offset
    pub offset: u64,

    /// Controller phase
    pub phase: CrawlPhase,

    /// Unique products accumulated so far, in discovery order
    pub products: Vec<Product>,

    /// Raw page payloads in fetch order, for the archive sink
    pub raw_pages: Vec<serde_json::Value>,

    /// Hits seen across all pages, before deduplication
    pub hits_seen: u64,

    seen: HashSet<DedupKey>,
}

impl CrawlState {
    /// Creates the initial state: offset 0, nothing accumulated
    pub fn new() -> Self {
        Self {
            offset: 0,
            phase: CrawlPhase::Running,
            products: Vec::new(),
            raw_pages: Vec::new(),
            hits_seen: 0,
            seen: HashSet::new(),
        }
    }

    /// Admits a product unless its dedup key was already seen this run.
    ///
    /// Returns true if the product was accumulated.
    pub fn admit(&mut self, product: Product) -> bool {
        self.hits_seen += 1;
        if self.seen.insert(dedup_key(&product)) {
            self.products.push(product);
            true
        } else {
            false
        }
    }

    /// Number of unique products accumulated so far
    pub fn unique_count(&self) -> u64 {
        self.products.len() as u64
    }

    /// Records a fetched raw page payload for the archive
    pub fn record_page(&mut self, payload: serde_json::Value) {
        self.raw_pages.push(payload);
    }
}

impl Default for CrawlState {
    fn default() -> Self {
        Self::new()
    }
}
