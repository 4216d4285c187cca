//! Shared HTTP client construction for provider requests.
//!
//! Providers are JSON APIs, so the client is plain: a timeout from the
//! configuration, gzip decompression, and a static User-Agent. Clients
//! are cheap to build per search; pooling is not required by the core.

use crate::config::SearchConfig;
use crate::error::SearchError;
use std::time::Duration;

/// Build a [`reqwest::Client`] for provider API requests.
///
/// The timeout applies per request and matches the provider deadline in
/// `config`, so a hanging provider is cut off at the transport layer as
/// well as by the orchestrator.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(concat!("pricescout/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        let config = SearchConfig::default();
        let client = build_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn build_client_with_short_timeout() {
        let config = SearchConfig {
            timeout_seconds: 1,
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }
}
