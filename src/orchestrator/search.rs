//! Core aggregation pipeline: concurrent multi-provider fan-out, score,
//! filter, rank, select.
//!
//! Fans the query out to every configured provider concurrently with a
//! per-provider deadline, merges whatever subset succeeded into one
//! pool, recomputes relevance centrally, flags price outliers, narrows
//! console queries to structurally confirmed consoles, and picks the
//! best offer by minimum trust-adjusted price.

use std::cmp::Ordering;
use std::time::Duration;

use crate::catalog::{classify_query, QueryProfile};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::ProviderTrait;
use crate::providers::{
    AmazonProvider, HttpStoreProvider, MercadoLivreProvider, SerperShoppingProvider,
};
use crate::ranking::outliers::flag_price_outliers;
use crate::ranking::relevance::{normalize_title, score_offers, title_confirms_console};
use crate::ranking::trust::apply_trust;
use crate::types::{Offer, ProviderKind, SearchOutcome};

/// Orchestrate one aggregated price search.
///
/// # Pipeline
///
/// 1. Classify the query into a [`QueryProfile`]
/// 2. Fan out to all configured providers concurrently
///    ([`futures::future::join_all`]) with a per-provider
///    [`tokio::time::timeout`]; failures and timeouts are logged and
///    contribute zero offers — never an aborted search
/// 3. Score every pooled offer and mark relevance
/// 4. Relevant subset, falling back to the full pool when empty
/// 5. Flag price outliers within that subset
/// 6. Candidates = relevant and not outlier, falling back to the full
///    relevant subset when empty
/// 7. For console queries, narrow to structurally confirmed consoles
///    when that leaves anything
/// 8. Apply trust factors; best = minimum effective price, first
///    encountered wins ties (provider registration order)
/// 9. Sort all offers by relevance descending then price ascending
///
/// An empty pool is a well-formed result (`results: [], best: None`),
/// not an error. Dropping the returned future cancels in-flight
/// provider calls without blocking.
pub async fn orchestrate_search(
    query: &str,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    let profile = classify_query(query);
    tracing::trace!(
        query,
        family = ?profile.family_slug(),
        category = ?profile.category(),
        "query classified"
    );

    let deadline = Duration::from_secs(config.timeout_seconds);
    let futures: Vec<_> = config
        .providers
        .iter()
        .map(|kind| {
            let q = query.to_string();
            let cfg = config.clone();
            let kind = *kind;
            async move {
                let outcome = tokio::time::timeout(deadline, query_provider(kind, &q, &cfg)).await;
                (kind, outcome)
            }
        })
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    let mut pool: Vec<Offer> = Vec::new();
    for (kind, outcome) in outcomes {
        match outcome {
            Ok(Ok(offers)) => {
                tracing::debug!(provider = %kind, count = offers.len(), "provider returned offers");
                pool.extend(offers);
            }
            Ok(Err(err)) => {
                tracing::warn!(provider = %kind, error = %err, "provider query failed");
            }
            Err(_) => {
                tracing::warn!(
                    provider = %kind,
                    timeout_seconds = config.timeout_seconds,
                    "provider timed out"
                );
            }
        }
    }

    if pool.is_empty() {
        tracing::debug!(query, "no provider returned offers");
        return Ok(SearchOutcome {
            query: query.to_string(),
            results: vec![],
            best: None,
        });
    }

    let (results, best) = rank_and_select(&profile, pool, config.relevance_threshold);

    if let Some(ref best) = best {
        tracing::info!(
            store = %best.store,
            price = best.price,
            effective_price = best.effective_price,
            price_outlier = best.price_outlier,
            "best offer selected"
        );
    }

    Ok(SearchOutcome {
        query: query.to_string(),
        results,
        best,
    })
}

/// Run pipeline steps 3–9 over an already-merged offer pool.
///
/// Separated from the fan-out so the filtering and selection semantics
/// can be exercised on synthetic pools without network access. Returns
/// the sorted pool and the best offer; the best offer is always a clone
/// of a pool member.
pub fn rank_and_select(
    profile: &QueryProfile,
    mut pool: Vec<Offer>,
    relevance_threshold: f64,
) -> (Vec<Offer>, Option<Offer>) {
    // 3. Central relevance scoring.
    score_offers(profile, &mut pool, relevance_threshold);

    // 4. Relevant subset; an all-irrelevant pool falls back to itself —
    // never zero candidates while offers exist.
    let mut relevant: Vec<usize> = (0..pool.len()).filter(|&i| pool[i].relevant).collect();
    if relevant.is_empty() {
        relevant = (0..pool.len()).collect();
    }

    // 5. Outlier flags within the relevant subset.
    flag_price_outliers(&mut pool, &relevant);

    // 6. Candidates; outlier-flagging must never eliminate everyone.
    let mut candidates: Vec<usize> = relevant
        .iter()
        .copied()
        .filter(|&i| !pool[i].price_outlier)
        .collect();
    if candidates.is_empty() {
        candidates = relevant;
    }

    // 7. Console queries need structural confirmation: prefer offers
    // that are the console itself over games and accessories, but only
    // when that still leaves something to choose from.
    if profile.is_console_query() {
        let confirmed: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| title_confirms_console(&normalize_title(&pool[i].title)))
            .collect();
        if !confirmed.is_empty() {
            candidates = confirmed;
        }
    }

    // 8. Trust-adjusted selection.
    apply_trust(&mut pool);
    let best = best_candidate(&pool, &candidates).cloned();

    // 9. Presentation order: relevance descending, then price ascending.
    pool.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal))
    });

    (pool, best)
}

/// Pick the candidate with the minimum effective price.
///
/// Strict `<` comparison keeps the first candidate encountered when
/// several share the exact minimum — the documented stable tie-break
/// (provider registration order).
fn best_candidate<'a>(pool: &'a [Offer], candidates: &[usize]) -> Option<&'a Offer> {
    let mut best: Option<&Offer> = None;
    let mut best_effective = f64::INFINITY;
    for &i in candidates {
        if pool[i].effective_price < best_effective {
            best_effective = pool[i].effective_price;
            best = Some(&pool[i]);
        }
    }
    best
}

/// Query a single provider, dispatching to the concrete implementation.
async fn query_provider(
    kind: ProviderKind,
    query: &str,
    config: &SearchConfig,
) -> Result<Vec<Offer>, SearchError> {
    match kind {
        ProviderKind::MercadoLivre => MercadoLivreProvider.search(query, config).await,
        ProviderKind::Amazon => AmazonProvider.search(query, config).await,
        ProviderKind::SerperShopping => SerperShoppingProvider.search(query, config).await,
        ProviderKind::HttpStore => HttpStoreProvider.search(query, config).await,
    }
}
