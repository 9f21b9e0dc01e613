//! Storage module for persisting harvested products
//!
//! This module handles all database operations for the harvester:
//! - SQLite database initialization and schema management
//! - The idempotent bulk product insert (the persistence sink)
//! - Row-count queries for the CLI stats mode

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStore;
pub use traits::{ProductStore, StorageError, StorageResult};

use crate::SiftError;
use std::path::Path;

/// Initializes or opens a product store
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
/// * `table` - Target table for product rows
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully initialized store
/// * `Err(SiftError)` - Failed to initialize
pub fn open_store(path: &Path, table: &str) -> Result<SqliteStore, SiftError> {
    SqliteStore::open(path, table)
}
