//! Storage traits and error types

use crate::model::Product;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for product store backends
///
/// The store guards durable product identity with a uniqueness constraint
/// on `link`; the insert contract is idempotent across repeated runs.
pub trait ProductStore {
    /// Inserts a batch of products in one transaction.
    ///
    /// Rows whose `link` already exists are silently skipped, never
    /// updated, so re-running a crawl only adds genuinely new rows. The
    /// whole batch commits or none of it does; on fault the transaction is
    /// rolled back and the error surfaces to the caller.
    ///
    /// # Returns
    ///
    /// The number of rows actually inserted
    fn insert_products(&mut self, products: &[Product]) -> StorageResult<usize>;

    /// Counts all product rows
    fn count_rows(&self) -> StorageResult<u64>;

    /// Counts product rows for one category
    fn count_rows_for_category(&self, category: &str) -> StorageResult<u64>;

    /// Returns true if a product with this link is already persisted
    fn link_exists(&self, link: &str) -> StorageResult<bool>;

    /// Lists the distinct categories present, with row counts
    fn category_breakdown(&self) -> StorageResult<Vec<(String, u64)>>;
}
