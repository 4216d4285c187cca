//! # pricescout
//!
//! Multi-provider product price search for Brazilian storefronts.
//!
//! This crate takes a free-text product query, fans it out to several
//! independent, unreliable external search providers, normalises and
//! scores the returned offers for relevance, filters out noise
//! (accessories mistaken for the product, price outliers), and selects
//! a single best offer by trust-adjusted price.
//!
//! ## Design
//!
//! - Queries Mercado Livre, Amazon, Google Shopping (Serper) and a demo
//!   HTTP store concurrently and merges the offers into one pool
//! - Per-provider fault isolation: a provider that errors, times out or
//!   lacks credentials contributes zero offers, never a failed search
//! - Relevance is recomputed centrally for every offer, with domain
//!   heuristics disambiguating consoles from games and accessories
//! - Median-based price outlier flagging with conservative fallbacks:
//!   filtering never leaves the caller with zero candidates while any
//!   offer exists
//! - Optional TTL cache of whole outcomes; disabled by default
//!
//! ## Security
//!
//! - API keys are read from configuration or environment, never logged
//! - Search queries are logged only at trace level
//! - No network listeners — this is a library, not a server

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod price;
pub mod provider;
pub mod providers;
pub mod ranking;
pub mod types;

pub use catalog::{classify_query, QueryProfile};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use provider::ProviderTrait;
pub use types::{Offer, ProviderKind, SearchOutcome};

/// Run one aggregated price search across all configured providers.
///
/// Providers are queried concurrently; whatever subset succeeds feeds
/// the ranking pipeline. "No offers found" is a valid outcome
/// (`results` empty, `best` `None`), never an error — the only failure
/// modes are configuration mistakes.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` fails validation.
/// Provider failures never propagate: each one degrades to zero offers
/// with a logged diagnostic.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> pricescout::Result<()> {
/// let config = pricescout::SearchConfig::from_env();
/// let outcome = pricescout::search_all("ps5", &config).await?;
/// match &outcome.best {
///     Some(best) => println!("{}: R$ {:.2} em {}", best.title, best.price, best.store),
///     None => println!("nenhuma oferta encontrada"),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_all(query: &str, config: &SearchConfig) -> Result<SearchOutcome> {
    config.validate()?;

    if config.cache_ttl_seconds > 0 {
        let key = cache::CacheKey::new(query, &config.providers);
        if let Some(hit) = cache::get(&key, config.cache_ttl_seconds).await {
            tracing::debug!(query, "search outcome served from cache");
            return Ok(hit);
        }
        let outcome = orchestrator::search::orchestrate_search(query, config).await?;
        cache::insert(key, outcome.clone(), config.cache_ttl_seconds).await;
        return Ok(outcome);
    }

    orchestrator::search::orchestrate_search(query, config).await
}

/// Run a price search with sensible default configuration.
///
/// Convenience wrapper around [`search_all`] using
/// [`SearchConfig::default()`]. Note that the default configuration has
/// no credentials, so only keyless providers participate.
///
/// # Errors
///
/// Same as [`search_all`].
pub async fn search_all_default(query: &str) -> Result<SearchOutcome> {
    search_all(query, &SearchConfig::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_types_are_reexported() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Offer>();
        assert_send_sync::<SearchOutcome>();
        assert_send_sync::<SearchConfig>();
    }

    #[tokio::test]
    async fn search_all_validates_empty_providers() {
        let config = SearchConfig {
            providers: vec![],
            ..Default::default()
        };
        let result = search_all("ps5", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("provider"));
    }

    #[tokio::test]
    async fn search_all_validates_zero_timeout() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let result = search_all("ps5", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn search_all_validates_threshold() {
        let config = SearchConfig {
            relevance_threshold: 0.0,
            ..Default::default()
        };
        let result = search_all("ps5", &config).await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("relevance_threshold"));
    }
}
