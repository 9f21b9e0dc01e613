//! HTTP page fetcher
//!
//! This module issues the paginated catalog requests, including:
//! - Building an HTTP client carrying the endpoint's static header set
//! - One GET per page at `{base_url}{offset}`
//! - Decoding the `{hits: {hits: [{_source: ...}], total: N}}` payload
//!
//! No retry logic lives here; faults are returned to the controller, which
//! owns the retry policy.

use crate::config::ApiConfig;
use crate::model::RawRecord;
use crate::ConfigError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE, HOST, PRAGMA, REFERER};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// A transport-level fault from one page fetch.
///
/// These are recovered by the controller's retry policy and only surface
/// as a run failure once the retry budget is exhausted.
#[derive(Debug, Error)]
pub enum TransportFault {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("undecodable payload: {0}")]
    Payload(#[source] reqwest::Error),
}

/// One decoded catalog page
#[derive(Debug)]
pub struct CatalogPage {
    /// HTTP status of the response (always 2xx on the success path)
    pub status: u16,

    /// Raw product records unwrapped from the hit envelopes
    pub hits: Vec<RawRecord>,

    /// Total hit count reported by the API for the whole category
    pub total: u64,

    /// The full undecoded payload, kept for the archive
    pub payload: Value,
}

/// Builds an HTTP client carrying the endpoint's static header set
///
/// The catalog endpoint expects browser-shaped requests: a real user agent
/// plus accept/cache headers, and optionally explicit Host and Referer.
///
/// # Arguments
///
/// * `config` - The API endpoint configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(SiftError)` - A configured header value or the client was invalid
pub fn build_http_client(config: &ApiConfig) -> crate::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        "Accept-Language",
        HeaderValue::from_static("en-US,en;q=0.9,ar-EG;q=0.8,ar;q=0.7"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

    if let Some(host) = &config.host {
        headers.insert(HOST, header_value(host, "host")?);
    }
    if let Some(referer) = &config.referer {
        headers.insert(REFERER, header_value(referer, "referer")?);
    }

    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

fn header_value(value: &str, name: &str) -> crate::Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        ConfigError::Validation(format!("{} is not a valid header value: '{}'", name, value))
            .into()
    })
}

/// Fetches and decodes one catalog page
///
/// One network round trip per call; the caller controls the offset. Missing
/// or misshapen payload sections decode tolerantly: a hit without a
/// `_source` object becomes an empty record, a missing `total` reads as 0.
/// Only a failed request, a non-2xx status, or a body that is not JSON at
/// all count as faults.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `base_url` - The paginated endpoint; the offset is appended directly
/// * `offset` - The pagination offset for this page
pub async fn fetch_page(
    client: &Client,
    base_url: &str,
    offset: u64,
) -> Result<CatalogPage, TransportFault> {
    let url = format!("{}{}", base_url, offset);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(TransportFault::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportFault::Status {
            status: status.as_u16(),
        });
    }

    let payload: Value = response.json().await.map_err(TransportFault::Payload)?;

    let envelope = payload.get("hits");

    let total = envelope
        .and_then(|h| h.get("total"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let hits = envelope
        .and_then(|h| h.get("hits"))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| {
                    entry
                        .get("_source")
                        .and_then(Value::as_object)
                        .cloned()
                        .unwrap_or_default()
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(CatalogPage {
        status: status.as_u16(),
        hits,
        total,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> ApiConfig {
        ApiConfig {
            base_url: "https://www.jarir.com/api/catalog/from/".to_string(),
            product_base_url: "https://www.jarir.com/".to_string(),
            page_size: 12,
            user_agent: "TestAgent/1.0".to_string(),
            referer: Some("https://www.jarir.com/".to_string()),
            host: None,
            request_timeout_secs: 30,
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_rejects_bad_header() {
        let mut config = create_test_config();
        config.referer = Some("bad\nvalue".to_string());
        assert!(build_http_client(&config).is_err());
    }

    // Fetch behavior against live responses is covered by the wiremock
    // integration tests in tests/harvest_tests.rs.
}
