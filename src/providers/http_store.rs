//! Demo HTTP store backed by the public dummyjson.com API.
//!
//! Keyless, so it always participates. Useful as a smoke-test source
//! and as the reference adapter for anyone wiring up a real store API.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::ProviderTrait;
use crate::types::{Offer, ProviderKind};
use serde_json::Value;

const SEARCH_URL: &str = "https://dummyjson.com/products/search";

/// Results requested per query.
const RESULT_LIMIT: u32 = 10;

/// dummyjson.com demo store provider.
pub struct HttpStoreProvider;

impl ProviderTrait for HttpStoreProvider {
    async fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<Offer>, SearchError> {
        tracing::trace!(query, "HTTP store search");

        let client = http::build_client(config)?;
        let limit = RESULT_LIMIT.to_string();
        let response = client
            .get(SEARCH_URL)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("HTTP store request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("HTTP store HTTP error: {e}")))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("HTTP store payload not JSON: {e}")))?;

        Ok(parse_http_store_payload(&payload, query))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::HttpStore
    }
}

/// Map the dummyjson payload (`{"products": [...]}`) to offers.
///
/// Prices here are plain JSON numbers; anything non-positive is
/// dropped. A missing title falls back to the query text.
pub(crate) fn parse_http_store_payload(payload: &Value, query: &str) -> Vec<Offer> {
    let products = payload
        .get("products")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let kind = ProviderKind::HttpStore;
    let mut offers = Vec::new();

    for product in products {
        let Some(price) = product.get("price").and_then(Value::as_f64) else {
            continue;
        };
        if !price.is_finite() || price <= 0.0 {
            continue;
        }

        offers.push(Offer {
            store: kind.name().to_string(),
            source: kind.tag().to_string(),
            id: product
                .get("id")
                .and_then(Value::as_u64)
                .map(|id| id.to_string()),
            title: product
                .get("title")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .unwrap_or(query)
                .to_string(),
            price,
            currency: "BRL".to_string(),
            url: product
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
            thumbnail: product
                .get("thumbnail")
                .and_then(Value::as_str)
                .map(str::to_string),
            relevance_score: 0.0,
            relevant: false,
            price_outlier: false,
            store_trust_factor: 1.0,
            effective_price: 0.0,
        });
    }

    tracing::debug!(count = offers.len(), "HTTP store offers parsed");
    offers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mock_payload() -> Value {
        json!({
            "products": [
                {
                    "id": 1,
                    "title": "iPhone 13 128GB Azul",
                    "price": 3999.9,
                    "thumbnail": "https://cdn.dummyjson.com/1.jpg"
                },
                {
                    "id": 2,
                    "title": "iPhone 13 Case",
                    "price": 19.9
                },
                {
                    "id": 3,
                    "title": "Brinde",
                    "price": 0
                }
            ],
            "total": 3
        })
    }

    #[test]
    fn parse_mock_payload_maps_offers() {
        let offers = parse_http_store_payload(&mock_payload(), "iphone 13");
        assert_eq!(offers.len(), 2);

        assert_eq!(offers[0].title, "iPhone 13 128GB Azul");
        assert_eq!(offers[0].id.as_deref(), Some("1"));
        assert_eq!(offers[0].store, "Loja HTTP Exemplo");
        assert_eq!(offers[0].source, "http_store_example");
        assert_eq!(offers[0].currency, "BRL");
        assert_eq!(
            offers[0].thumbnail.as_deref(),
            Some("https://cdn.dummyjson.com/1.jpg")
        );
    }

    #[test]
    fn zero_priced_items_are_dropped() {
        let offers = parse_http_store_payload(&mock_payload(), "iphone 13");
        assert!(offers.iter().all(|o| o.price > 0.0));
        assert!(!offers.iter().any(|o| o.title == "Brinde"));
    }

    #[test]
    fn missing_title_falls_back_to_query() {
        let payload = json!({"products": [{"id": 9, "price": 10.0}]});
        let offers = parse_http_store_payload(&payload, "consulta original");
        assert_eq!(offers[0].title, "consulta original");
    }

    #[test]
    fn empty_payload_yields_empty() {
        assert!(parse_http_store_payload(&json!({}), "q").is_empty());
        assert!(parse_http_store_payload(&json!({"products": []}), "q").is_empty());
    }

    #[test]
    fn kind_is_http_store() {
        assert_eq!(HttpStoreProvider.kind(), ProviderKind::HttpStore);
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_http_store_search() {
        let provider = HttpStoreProvider;
        let config = SearchConfig::default();
        let offers = provider.search("phone", &config).await;
        assert!(offers.is_ok());
        for offer in offers.expect("live search should work") {
            assert!(offer.price > 0.0);
            assert!(!offer.title.is_empty());
        }
    }
}
