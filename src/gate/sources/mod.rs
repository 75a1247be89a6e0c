//! Concrete metadata source implementations

pub mod app_store;
pub mod remote_config;

use std::time::Duration;

/// Timeout applied to every outbound request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client configuration for all sources
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("update-gate")
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}
