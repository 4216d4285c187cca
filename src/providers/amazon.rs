//! Amazon product search via the RapidAPI real-time-amazon-data API.
//!
//! Queries the `/search` endpoint with Brazilian locale parameters.
//! The RapidAPI host is overridable through configuration because the
//! gateway occasionally rehomes the API.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::price::parse_price;
use crate::provider::ProviderTrait;
use crate::types::{Offer, ProviderKind};
use serde_json::Value;

const DEFAULT_HOST: &str = "real-time-amazon-data.p.rapidapi.com";

/// Amazon price provider.
pub struct AmazonProvider;

impl ProviderTrait for AmazonProvider {
    async fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<Offer>, SearchError> {
        let Some(api_key) = config.rapidapi_key.as_deref() else {
            tracing::warn!(provider = %self.kind(), "RAPIDAPI_KEY not configured; provider disabled");
            return Ok(vec![]);
        };
        let host = config
            .rapidapi_amazon_host
            .as_deref()
            .unwrap_or(DEFAULT_HOST);

        tracing::trace!(query, "Amazon search");

        let client = http::build_client(config)?;
        let response = client
            .get(format!("https://{host}/search"))
            .query(&[
                ("query", query),
                ("page", "1"),
                ("country", "BR"),
                ("sort_by", "RELEVANCE"),
                ("product_condition", "ALL"),
                ("is_prime", "false"),
                ("deals_and_discounts", "NONE"),
                ("language", "pt_BR"),
            ])
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", host)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("Amazon request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http(format!("Amazon HTTP error: {status}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("Amazon payload not JSON: {e}")))?;

        Ok(parse_amazon_payload(&payload, query))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Amazon
    }
}

/// Map the Amazon payload (`{"data": {"products": [...]}}`) to offers.
///
/// Items without a positive, parsable `product_price` are dropped. A
/// missing title falls back to the query text, and a missing
/// `product_photo` falls back to the first entry of `product_photos`.
pub(crate) fn parse_amazon_payload(payload: &Value, query: &str) -> Vec<Offer> {
    let products = payload
        .get("data")
        .and_then(|d| d.get("products"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let kind = ProviderKind::Amazon;
    let mut offers = Vec::new();

    for product in products {
        let Some(price) = product
            .get("product_price")
            .and_then(|raw| parse_price(raw))
        else {
            continue;
        };
        if price <= 0.0 {
            continue;
        }

        let title = product
            .get("product_title")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or(query)
            .to_string();

        let thumbnail = product
            .get("product_photo")
            .and_then(Value::as_str)
            .or_else(|| {
                product
                    .get("product_photos")
                    .and_then(Value::as_array)
                    .and_then(|photos| photos.first())
                    .and_then(Value::as_str)
            })
            .map(str::to_string);

        let id = product
            .get("asin")
            .or_else(|| product.get("product_id"))
            .and_then(Value::as_str)
            .map(str::to_string);

        offers.push(Offer {
            store: kind.name().to_string(),
            source: kind.tag().to_string(),
            id,
            title,
            price,
            currency: product
                .get("currency")
                .and_then(Value::as_str)
                .unwrap_or("BRL")
                .to_string(),
            url: product
                .get("product_url")
                .and_then(Value::as_str)
                .map(str::to_string),
            thumbnail,
            relevance_score: 0.0,
            relevant: false,
            price_outlier: false,
            store_trust_factor: 1.0,
            effective_price: 0.0,
        });
    }

    tracing::debug!(count = offers.len(), "Amazon offers parsed");
    offers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mock_payload() -> Value {
        json!({
            "data": {
                "products": [
                    {
                        "asin": "B0ABCD1234",
                        "product_title": "Console PlayStation 5 Slim 1TB",
                        "product_price": "R$ 3.799,00",
                        "currency": "BRL",
                        "product_url": "https://www.amazon.com.br/dp/B0ABCD1234",
                        "product_photo": "https://m.media-amazon.com/images/1.jpg"
                    },
                    {
                        "asin": "B0EFGH5678",
                        "product_title": "",
                        "product_price": "R$ 299,00",
                        "product_photos": ["https://m.media-amazon.com/images/2.jpg"]
                    },
                    {
                        "asin": "B0SEMPRECO",
                        "product_title": "Produto sem preço",
                        "product_price": null
                    }
                ]
            }
        })
    }

    #[test]
    fn parse_mock_payload_maps_offers() {
        let offers = parse_amazon_payload(&mock_payload(), "ps5");
        assert_eq!(offers.len(), 2);

        assert_eq!(offers[0].title, "Console PlayStation 5 Slim 1TB");
        assert!((offers[0].price - 3799.0).abs() < f64::EPSILON);
        assert_eq!(offers[0].id.as_deref(), Some("B0ABCD1234"));
        assert_eq!(offers[0].store, "Amazon (via RapidAPI)");
        assert_eq!(offers[0].source, "amazon_rapidapi");
        assert_eq!(
            offers[0].thumbnail.as_deref(),
            Some("https://m.media-amazon.com/images/1.jpg")
        );
    }

    #[test]
    fn empty_title_falls_back_to_query() {
        let offers = parse_amazon_payload(&mock_payload(), "ps5");
        assert_eq!(offers[1].title, "ps5");
    }

    #[test]
    fn thumbnail_falls_back_to_first_photo() {
        let offers = parse_amazon_payload(&mock_payload(), "ps5");
        assert_eq!(
            offers[1].thumbnail.as_deref(),
            Some("https://m.media-amazon.com/images/2.jpg")
        );
    }

    #[test]
    fn unpriced_products_are_dropped() {
        let offers = parse_amazon_payload(&mock_payload(), "ps5");
        assert!(!offers.iter().any(|o| o.title.contains("sem preço")));
    }

    #[test]
    fn missing_currency_defaults_to_brl() {
        let offers = parse_amazon_payload(&mock_payload(), "ps5");
        assert_eq!(offers[1].currency, "BRL");
    }

    #[test]
    fn empty_payload_yields_empty() {
        assert!(parse_amazon_payload(&json!({}), "ps5").is_empty());
        assert!(parse_amazon_payload(&json!({"data": {}}), "ps5").is_empty());
    }

    #[tokio::test]
    async fn missing_key_degrades_to_empty() {
        let provider = AmazonProvider;
        let config = SearchConfig::default();
        let offers = provider
            .search("ps5", &config)
            .await
            .expect("should degrade, not fail");
        assert!(offers.is_empty());
    }

    #[test]
    fn kind_is_amazon() {
        assert_eq!(AmazonProvider.kind(), ProviderKind::Amazon);
    }
}
