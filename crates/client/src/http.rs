//! Shared HTTP plumbing.

use reqwest::StatusCode;

use crate::config::ClientConfig;

pub(crate) fn build_client(config: &ClientConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Message for a non-2xx response: the `message` field of a JSON error body
/// if there is one, else a generic status line.
pub(crate) fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}
