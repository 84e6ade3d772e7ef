//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, USER_AGENT};

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with the per-request timeout from
/// the configuration and this crate's User-Agent. Authentication is applied
/// per request, not here, so the client carries no credentials.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub async fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(Arc::new(client))
}
