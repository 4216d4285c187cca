//! Core types for price offers and provider identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single product offer returned by a price provider and enriched by
/// the ranking pipeline.
///
/// Providers fill the descriptive fields (`store` through `thumbnail`)
/// and guarantee `price > 0` — offers with a missing or unparsable price
/// never leave the adapter. The ranking fields (`relevance_score` onward)
/// start at their neutral values and are assigned by the aggregation
/// pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    /// Display name of the selling store, possibly with a provider tag
    /// (e.g. "Amazon (via RapidAPI)").
    pub store: String,
    /// Stable identifier of the provider that produced this offer.
    pub source: String,
    /// Provider-local identifier. Display/dedup hint only — not unique
    /// across providers.
    pub id: Option<String>,
    /// Free-text product title as returned by the provider.
    pub title: String,
    /// Canonical positive price in the reporting currency.
    pub price: f64,
    /// ISO-like currency code. "BRL" when the provider omits it.
    pub currency: String,
    /// Product page URL, if the provider supplied one.
    pub url: Option<String>,
    /// Product image URL, if the provider supplied one.
    pub thumbnail: Option<String>,
    /// Relevance to the query, >= 0, higher is a more likely true match.
    /// Always recomputed centrally — provider-side scores are discarded.
    pub relevance_score: f64,
    /// Whether `relevance_score` cleared the configured threshold.
    pub relevant: bool,
    /// Whether the median-based filter flagged this price as anomalous.
    pub price_outlier: bool,
    /// Per-store confidence multiplier in (0, 1]. Lower means more
    /// trusted; 1.0 for unknown stores.
    pub store_trust_factor: f64,
    /// `price * store_trust_factor`. Used only for best-offer selection,
    /// never shown to the user as the real price.
    pub effective_price: f64,
}

/// The price providers pricescout can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Mercado Livre listings via the RapidAPI gateway.
    MercadoLivre,
    /// Amazon product search via the RapidAPI real-time-amazon-data API.
    Amazon,
    /// Google Shopping results via the Serper API.
    SerperShopping,
    /// dummyjson.com demo store — keyless, useful for smoke testing.
    HttpStore,
}

impl ProviderKind {
    /// Returns the human-readable store name used on offers from this
    /// provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MercadoLivre => "Mercado Livre (via RapidAPI)",
            Self::Amazon => "Amazon (via RapidAPI)",
            Self::SerperShopping => "Google Shopping (Serper)",
            Self::HttpStore => "Loja HTTP Exemplo",
        }
    }

    /// Returns the stable source tag recorded on offers from this
    /// provider.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MercadoLivre => "mercado_livre_rapidapi",
            Self::Amazon => "amazon_rapidapi",
            Self::SerperShopping => "serper_shopping",
            Self::HttpStore => "http_store_example",
        }
    }

    /// Returns all available provider variants, in default registration
    /// order. This order is also the best-offer tie-break order.
    pub fn all() -> &'static [ProviderKind] {
        &[
            Self::MercadoLivre,
            Self::Amazon,
            Self::SerperShopping,
            Self::HttpStore,
        ]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of one aggregated price search.
///
/// "No offers found" is a valid terminal state: `results` empty and
/// `best` `None`. Whenever `best` is `Some`, it is a member of `results`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The raw query this outcome answers.
    pub query: String,
    /// All pooled offers, sorted by relevance descending then price
    /// ascending.
    pub results: Vec<Offer>,
    /// The offer with the minimum effective price among the candidate
    /// set, or `None` when no provider returned anything.
    pub best: Option<Offer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_offer() -> Offer {
        Offer {
            store: "Loja Mock".into(),
            source: "mock".into(),
            id: Some("MOCK-1".into()),
            title: "PlayStation 5 Console".into(),
            price: 3999.90,
            currency: "BRL".into(),
            url: Some("https://loja-mock.com/produto/1".into()),
            thumbnail: None,
            relevance_score: 0.0,
            relevant: false,
            price_outlier: false,
            store_trust_factor: 1.0,
            effective_price: 0.0,
        }
    }

    #[test]
    fn offer_construction() {
        let offer = make_offer();
        assert_eq!(offer.store, "Loja Mock");
        assert!((offer.price - 3999.90).abs() < f64::EPSILON);
        assert!(!offer.relevant);
    }

    #[test]
    fn offer_serde_round_trip() {
        let offer = make_offer();
        let json = serde_json::to_string(&offer).expect("serialize");
        let decoded: Offer = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.title, "PlayStation 5 Console");
        assert_eq!(decoded.currency, "BRL");
        assert_eq!(decoded.id.as_deref(), Some("MOCK-1"));
    }

    #[test]
    fn provider_kind_display() {
        assert_eq!(
            ProviderKind::MercadoLivre.to_string(),
            "Mercado Livre (via RapidAPI)"
        );
        assert_eq!(ProviderKind::Amazon.to_string(), "Amazon (via RapidAPI)");
        assert_eq!(
            ProviderKind::SerperShopping.to_string(),
            "Google Shopping (Serper)"
        );
        assert_eq!(ProviderKind::HttpStore.to_string(), "Loja HTTP Exemplo");
    }

    #[test]
    fn provider_kind_tags_are_stable() {
        assert_eq!(ProviderKind::MercadoLivre.tag(), "mercado_livre_rapidapi");
        assert_eq!(ProviderKind::Amazon.tag(), "amazon_rapidapi");
        assert_eq!(ProviderKind::SerperShopping.tag(), "serper_shopping");
        assert_eq!(ProviderKind::HttpStore.tag(), "http_store_example");
    }

    #[test]
    fn provider_kind_all() {
        let all = ProviderKind::all();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], ProviderKind::MercadoLivre);
        assert!(all.contains(&ProviderKind::HttpStore));
    }

    #[test]
    fn provider_kind_equality_and_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ProviderKind::Amazon);
        set.insert(ProviderKind::Amazon);
        assert_eq!(set.len(), 1);
        set.insert(ProviderKind::MercadoLivre);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn outcome_serde_round_trip() {
        let outcome = SearchOutcome {
            query: "ps5".into(),
            results: vec![make_offer()],
            best: Some(make_offer()),
        };
        let json = serde_json::to_string(&outcome).expect("serialize");
        let decoded: SearchOutcome = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.query, "ps5");
        assert_eq!(decoded.results.len(), 1);
        assert!(decoded.best.is_some());
    }

    #[test]
    fn empty_outcome_is_representable() {
        let outcome = SearchOutcome {
            query: "sem resultados".into(),
            results: vec![],
            best: None,
        };
        let json = serde_json::to_string(&outcome).expect("serialize");
        assert!(json.contains("\"best\":null"));
    }
}
