//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which providers are queried, the per-provider
//! deadline, the relevance threshold, caching, and credentials for the
//! providers that need them. Credentials are handed in by the caller or
//! resolved from the environment via [`SearchConfig::from_env`] — token
//! refresh is the caller's concern, not this crate's.

use crate::error::SearchError;
use crate::types::ProviderKind;

/// Configuration for one aggregated price search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Which providers to query. Queried concurrently; the order here is
    /// the stable tie-break order for best-offer selection.
    pub providers: Vec<ProviderKind>,
    /// Minimum relevance score for an offer to be marked `relevant`.
    /// Deployment profiles run this between 0.2 and 0.4.
    pub relevance_threshold: f64,
    /// Per-provider deadline in seconds. A provider that has not
    /// answered by then contributes zero offers.
    pub timeout_seconds: u64,
    /// How long to cache whole search outcomes, in seconds. 0 disables
    /// caching, which is the default: offers are meant to be fresh per
    /// search.
    pub cache_ttl_seconds: u64,
    /// RapidAPI key shared by the Mercado Livre and Amazon providers.
    /// Without it those providers return no offers.
    pub rapidapi_key: Option<String>,
    /// Override for the Amazon RapidAPI host header.
    pub rapidapi_amazon_host: Option<String>,
    /// Serper API key for Google Shopping. Without it that provider
    /// returns no offers.
    pub serper_api_key: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            providers: ProviderKind::all().to_vec(),
            relevance_threshold: 0.3,
            timeout_seconds: 12,
            cache_ttl_seconds: 0,
            rapidapi_key: None,
            rapidapi_amazon_host: None,
            serper_api_key: None,
        }
    }
}

impl SearchConfig {
    /// Build a default configuration with credentials taken from the
    /// environment: `RAPIDAPI_KEY`, `RAPIDAPI_HOST` (Amazon host
    /// override) and `SERPER_API_KEY`.
    ///
    /// Missing variables leave the corresponding field `None`; the
    /// affected providers then degrade to zero offers with a logged
    /// warning instead of failing the search.
    pub fn from_env() -> Self {
        fn env_non_empty(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|v| !v.trim().is_empty())
        }
        Self {
            rapidapi_key: env_non_empty("RAPIDAPI_KEY"),
            rapidapi_amazon_host: env_non_empty("RAPIDAPI_HOST"),
            serper_api_key: env_non_empty("SERPER_API_KEY"),
            ..Default::default()
        }
    }

    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - `providers` must not be empty
    /// - `timeout_seconds` must be greater than 0
    /// - `relevance_threshold` must be finite and in (0, 1]
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.providers.is_empty() {
            return Err(SearchError::Config(
                "at least one provider must be enabled".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if !self.relevance_threshold.is_finite()
            || self.relevance_threshold <= 0.0
            || self.relevance_threshold > 1.0
        {
            return Err(SearchError::Config(
                "relevance_threshold must be in (0, 1]".into(),
            ));
        }
        Ok(())
    }
}
