//! Souq-Sift: a product-catalog harvester
//!
//! This crate crawls a paginated product-catalog API, normalizes the
//! semi-structured records into a canonical product schema, deduplicates
//! them within a run, persists them idempotently to SQLite, and archives
//! the raw API responses for replay and audit.

pub mod archive;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Souq-Sift operations
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gave up at offset {offset} after {attempts} attempts: {source}")]
    RetriesExhausted {
        offset: u64,
        attempts: u32,
        source: crawler::TransportFault,
    },

    #[error("Harvest cancelled at offset {offset}")]
    Cancelled { offset: u64 },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] archive::ArchiveError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Souq-Sift operations
pub type Result<T> = std::result::Result<T, SiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_harvest, Controller};
pub use extract::{dedup_key, extract, DedupKey, ExtractContext};
pub use model::{HarvestReport, Product, RawRecord};
pub use state::{CrawlPhase, CrawlState};
