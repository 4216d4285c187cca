//! In-memory TTL cache for whole search outcomes.
//!
//! Caching is opt-in (`cache_ttl_seconds > 0`): the core's contract is
//! a fresh aggregation per call, so the default configuration bypasses
//! this module entirely. When enabled, outcomes are keyed by the
//! (lowercased query, provider set) pair using [`moka`] for
//! async-friendly TTL eviction.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;
use std::time::Duration;

use moka::future::Cache;

use crate::types::{ProviderKind, SearchOutcome};

/// Maximum number of cached outcomes.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Global process-wide outcome cache.
///
/// Lazily initialised on first access. TTL is set when first created
/// and cannot be changed after initialisation.
static CACHE: OnceLock<Cache<CacheKey, SearchOutcome>> = OnceLock::new();

/// Composite cache key: normalised query + provider set hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased, trimmed query string.
    query: String,
    /// Hash of the sorted provider set, so different provider configs
    /// produce different cache entries.
    provider_hash: u64,
}

impl CacheKey {
    /// Build a deterministic cache key from a query and provider list.
    ///
    /// The query is lowercased and trimmed. The provider list is sorted
    /// and hashed so that registration order does not split the cache.
    pub fn new(query: &str, providers: &[ProviderKind]) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            provider_hash: hash_providers(providers),
        }
    }
}

/// Get or initialise the global cache with the given TTL.
///
/// The TTL is only used on the **first** call; subsequent calls reuse
/// the existing cache regardless of the TTL argument.
fn get_or_init_cache(ttl_seconds: u64) -> &'static Cache<CacheKey, SearchOutcome> {
    CACHE.get_or_init(|| {
        Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build()
    })
}

/// Look up a cached outcome for the given key.
///
/// Returns `Some(outcome)` on cache hit, `None` on miss.
pub async fn get(key: &CacheKey, ttl_seconds: u64) -> Option<SearchOutcome> {
    let cache = get_or_init_cache(ttl_seconds);
    cache.get(key).await
}

/// Insert a search outcome into the cache.
pub async fn insert(key: CacheKey, outcome: SearchOutcome, ttl_seconds: u64) {
    let cache = get_or_init_cache(ttl_seconds);
    cache.insert(key, outcome).await;
}

/// Compute a deterministic hash of a provider set.
///
/// The list is sorted before hashing so that order does not matter.
fn hash_providers(providers: &[ProviderKind]) -> u64 {
    let mut sorted: Vec<ProviderKind> = providers.to_vec();
    sorted.sort();
    sorted.dedup();
    let mut hasher = DefaultHasher::new();
    sorted.hash(&mut hasher);
    hasher.finish()
}
