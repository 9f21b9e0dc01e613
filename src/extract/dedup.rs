//! In-run deduplication key
//!
//! Pagination drift can surface the same product on overlapping pages; the
//! dedup key suppresses those repeats within a single run. It is not a
//! substitute for the store-side uniqueness constraint on `link`, which is
//! the durable identity guard across runs.

use crate::model::Product;

/// Identity projection of a product for in-run deduplication.
///
/// Prices are held as raw bits so the key can derive `Eq` and `Hash`; the
/// values come straight out of JSON, so NaN never occurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    name: String,
    specs: String,
    new_price_bits: u64,
    old_price_bits: u64,
    link: String,
}

/// Builds the dedup key for a product.
pub fn dedup_key(product: &Product) -> DedupKey {
    DedupKey {
        name: product.name.clone(),
        specs: product.specs.clone(),
        new_price_bits: product.new_price.to_bits(),
        old_price_bits: product.old_price.to_bits(),
        link: product.link.clone(),
    }
}
