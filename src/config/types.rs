use serde::Deserialize;

/// Main configuration structure for Souq-Sift
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    pub output: OutputConfig,
}

/// Catalog API endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Paginated search endpoint; the pagination offset is appended directly
    /// (e.g. `{base-url}0`, `{base-url}12`, ...).
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Base URL product slugs are joined onto to form canonical links
    #[serde(rename = "product-base-url")]
    pub product_base_url: String,

    /// Hits per page reported by the API; the offset advances by this amount
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Referer header, when the endpoint expects one
    #[serde(default)]
    pub referer: Option<String>,

    /// Explicit Host header, when the endpoint expects one
    #[serde(default)]
    pub host: Option<String>,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Per-run crawl parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Category label persisted with every product in this run
    pub category: String,

    /// Fixed UTC offset, in hours, applied to every timestamp
    #[serde(rename = "timezone-offset-hours", default = "default_timezone_offset")]
    pub timezone_offset_hours: i32,

    /// Store label persisted with every product, for variants that use one
    #[serde(default)]
    pub store: Option<String>,

    /// Whether to read the stock flag from each record
    #[serde(rename = "track-stock", default)]
    pub track_stock: bool,
}

/// Retry policy for transport faults
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Attempts per offset before the run fails
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts, in seconds
    #[serde(rename = "delay-secs", default = "default_retry_delay")]
    pub delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_secs: default_retry_delay(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Target table for product rows
    #[serde(default = "default_table")]
    pub table: String,

    /// Path the raw response archive is written to (whole-file overwrite)
    #[serde(rename = "archive-path")]
    pub archive_path: String,
}

fn default_page_size() -> u64 {
    12
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_timezone_offset() -> i32 {
    3
}

fn default_max_attempts() -> u32 {
    5
}

fn default_retry_delay() -> u64 {
    5
}

fn default_table() -> String {
    "products".to_string()
}
