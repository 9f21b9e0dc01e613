use crate::config::types::{ApiConfig, Config, CrawlConfig, OutputConfig, RetryConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_crawl_config(&config.crawl)?;
    validate_retry_config(&config.retry)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates API endpoint configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    // The offset is appended directly, so the base URL must already be a
    // well-formed absolute URL on its own.
    Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    Url::parse(&config.product_base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid product-base-url: {}", e)))?;

    if config.page_size < 1 {
        return Err(ConfigError::Validation(format!(
            "page-size must be >= 1, got {}",
            config.page_size
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates per-run crawl parameters
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.category.is_empty() {
        return Err(ConfigError::Validation(
            "category cannot be empty".to_string(),
        ));
    }

    if config.timezone_offset_hours < -23 || config.timezone_offset_hours > 23 {
        return Err(ConfigError::Validation(format!(
            "timezone-offset-hours must be between -23 and 23, got {}",
            config.timezone_offset_hours
        )));
    }

    if let Some(store) = &config.store {
        if store.is_empty() {
            return Err(ConfigError::Validation(
                "store cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the retry policy
fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    if config.archive_path.is_empty() {
        return Err(ConfigError::Validation(
            "archive-path cannot be empty".to_string(),
        ));
    }

    validate_table_name(&config.table)?;

    Ok(())
}

/// Validates the target table name
///
/// The table name is interpolated into SQL statements, so it is restricted
/// to a plain identifier: letters, digits, underscores, not starting with
/// a digit.
fn validate_table_name(table: &str) -> Result<(), ConfigError> {
    if table.is_empty() {
        return Err(ConfigError::Validation(
            "table cannot be empty".to_string(),
        ));
    }

    if table.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return Err(ConfigError::Validation(format!(
            "table '{}' cannot start with a digit",
            table
        )));
    }

    if !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::Validation(format!(
            "table '{}' may contain only letters, digits, and underscores",
            table
        )));
    }

    Ok(())
}
