//! Mercado Livre listings via the RapidAPI gateway.
//!
//! Queries `mercado-libre7.p.rapidapi.com/listings_for_search` sorted
//! cheapest-first. Prices arrive either as numbers or as strings like
//! "R$ 2.699,10"; the shared price parser handles both.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::price::parse_price;
use crate::provider::ProviderTrait;
use crate::types::{Offer, ProviderKind};
use serde_json::Value;

const SEARCH_URL: &str = "https://mercado-libre7.p.rapidapi.com/listings_for_search";
const RAPIDAPI_HOST: &str = "mercado-libre7.p.rapidapi.com";

/// Mercado Livre price provider.
pub struct MercadoLivreProvider;

impl ProviderTrait for MercadoLivreProvider {
    async fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<Offer>, SearchError> {
        let Some(api_key) = config.rapidapi_key.as_deref() else {
            tracing::warn!(provider = %self.kind(), "RAPIDAPI_KEY not configured; provider disabled");
            return Ok(vec![]);
        };

        tracing::trace!(query, "Mercado Livre search");

        let client = http::build_client(config)?;
        let response = client
            .get(SEARCH_URL)
            .query(&[
                ("search_str", query),
                ("country", "br"),
                ("sort_by", "price_asc"),
                ("page_num", "1"),
            ])
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", RAPIDAPI_HOST)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("Mercado Livre request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Mercado Livre HTTP error: {e}")))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("Mercado Livre payload not JSON: {e}")))?;

        Ok(parse_mercado_livre_payload(&payload))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::MercadoLivre
    }
}

/// Map the Mercado Livre payload (`{"data": [...]}`) to offers.
///
/// Items without a positive, parsable price are dropped. The currency
/// field arrives as a symbol ("R$"); anything containing an `R` maps to
/// "BRL", other values pass through unchanged.
pub(crate) fn parse_mercado_livre_payload(payload: &Value) -> Vec<Offer> {
    let items = payload
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let kind = ProviderKind::MercadoLivre;
    let mut offers = Vec::new();

    for item in items {
        let title = item
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let Some(price) = item.get("price").and_then(|raw| parse_price(raw)) else {
            continue;
        };
        if price <= 0.0 {
            continue;
        }

        let currency_raw = item.get("currency").and_then(Value::as_str).unwrap_or("R$");
        let currency = if currency_raw.contains('R') {
            "BRL".to_string()
        } else {
            currency_raw.to_string()
        };

        offers.push(Offer {
            store: kind.name().to_string(),
            source: kind.tag().to_string(),
            id: json_id(item.get("id")),
            title,
            price,
            currency,
            url: item
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
            thumbnail: None,
            relevance_score: 0.0,
            relevant: false,
            price_outlier: false,
            store_trust_factor: 1.0,
            effective_price: 0.0,
        });
    }

    tracing::debug!(count = offers.len(), "Mercado Livre offers parsed");
    offers
}

/// Provider ids come back as strings or numbers depending on the item.
fn json_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
