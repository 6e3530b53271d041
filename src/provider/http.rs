//! HTTP client construction, request headers, and status mapping.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, PRAGMA};

use crate::error::{LettricsError, Result};

/// Build a pooled client with the given request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()?)
}

/// Headers asking every cache on the path for a fresh reply.
pub fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers
}

/// Map a non-success status to an error, keeping a short body excerpt.
pub fn status_to_error(status: u16, body: &str) -> LettricsError {
    let excerpt: String = body.trim().chars().take(200).collect();
    let message = if excerpt.is_empty() {
        format!("endpoint returned status {status}")
    } else {
        excerpt
    };
    LettricsError::api(status, message)
}
