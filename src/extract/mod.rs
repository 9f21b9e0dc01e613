//! Extraction module: raw records to canonical products
//!
//! This module contains the two pure stages of the pipeline:
//! - Field extraction: tolerant mapping of a raw API record to a `Product`
//! - Dedup key building: the in-run identity projection of a `Product`
//!
//! Neither stage performs I/O and neither can fail; missing source fields
//! resolve to documented sentinels.

mod dedup;
mod fields;

pub use dedup::{dedup_key, DedupKey};
pub use fields::{extract, sentinel, source, ExtractContext, LINK_SUFFIX};
