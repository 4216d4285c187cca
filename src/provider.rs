//! Trait definition for pluggable price provider backends.
//!
//! Each provider (Mercado Livre, Amazon, Serper, the demo HTTP store)
//! implements [`ProviderTrait`] to expose a uniform search interface
//! over a wildly non-uniform set of external APIs.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{Offer, ProviderKind};

/// A pluggable price provider backend.
///
/// Implementors query one external source and map its raw item schema
/// to canonical [`Offer`] values. Each provider handles its own:
///
/// - request construction (query encoding, auth headers, pagination/sort
///   parameters)
/// - payload mapping, applying the price parser and dropping items whose
///   price is missing, unparsable or non-positive
/// - credential checks: a missing key degrades to `Ok(vec![])` with a
///   logged warning, never an error
///
/// Transport and payload failures surface as [`SearchError`]; the
/// orchestrator isolates those to zero offers so one broken provider
/// never aborts the aggregate search.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait ProviderTrait: Send + Sync {
    /// Search this provider for offers matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the HTTP request fails, the response
    /// status is not successful, or the payload cannot be interpreted.
    fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<Offer>, SearchError>> + Send;

    /// Returns which [`ProviderKind`] this implementation represents.
    fn kind(&self) -> ProviderKind;
}
