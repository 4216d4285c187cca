//! Google Shopping results via the Serper API.
//!
//! POSTs a JSON body to `google.serper.dev/shopping` with Brazilian
//! locale settings. Serper pre-scores its own results server-side; that
//! scale is unrelated to ours, so only the descriptive fields are taken
//! and relevance is recomputed centrally.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::price::parse_price;
use crate::provider::ProviderTrait;
use crate::types::{Offer, ProviderKind};
use serde_json::{json, Value};

const SHOPPING_URL: &str = "https://google.serper.dev/shopping";

/// Results requested per query. Kept modest — Serper bills per credit.
const RESULT_COUNT: u32 = 20;

/// Google Shopping price provider.
pub struct SerperShoppingProvider;

impl ProviderTrait for SerperShoppingProvider {
    async fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<Offer>, SearchError> {
        let Some(api_key) = config.serper_api_key.as_deref() else {
            tracing::warn!(provider = %self.kind(), "SERPER_API_KEY not configured; provider disabled");
            return Ok(vec![]);
        };

        let query = query.trim();
        if query.is_empty() {
            return Ok(vec![]);
        }

        tracing::trace!(query, "Serper shopping search");

        let body = json!({
            "q": query,
            "gl": "br",
            "hl": "pt-br",
            "num": RESULT_COUNT,
        });

        let client = http::build_client(config)?;
        let response = client
            .post(SHOPPING_URL)
            .json(&body)
            .header("X-API-KEY", api_key)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("Serper request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Serper HTTP error: {e}")))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("Serper payload not JSON: {e}")))?;

        Ok(parse_serper_payload(&payload))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::SerperShopping
    }
}

/// Map the Serper payload (`{"shopping": [...]}`) to offers.
///
/// Serper items name the actual selling store in `source`, so unlike
/// the other providers the store field varies per item ("Loja" when
/// absent). Items without a positive, parsable price are dropped.
pub(crate) fn parse_serper_payload(payload: &Value) -> Vec<Offer> {
    let items = payload
        .get("shopping")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let kind = ProviderKind::SerperShopping;
    let mut offers = Vec::new();

    for item in items {
        let Some(price) = item.get("price").and_then(|raw| parse_serper_price(raw)) else {
            continue;
        };
        if price <= 0.0 {
            continue;
        }

        let title = item
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let store = item
            .get("source")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("Loja")
            .to_string();
        let link = item.get("link").and_then(Value::as_str);

        // Best-available item id: productId, then position, then link.
        let id = item
            .get("productId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| {
                item.get("position")
                    .and_then(Value::as_u64)
                    .map(|p| p.to_string())
            })
            .or_else(|| link.map(str::to_string));

        offers.push(Offer {
            store,
            source: kind.tag().to_string(),
            id,
            title,
            price,
            currency: "BRL".to_string(),
            url: link.map(str::to_string),
            thumbnail: item
                .get("imageUrl")
                .and_then(Value::as_str)
                .map(str::to_string),
            relevance_score: 0.0,
            relevant: false,
            price_outlier: false,
            store_trust_factor: 1.0,
            effective_price: 0.0,
        });
    }

    tracing::debug!(count = offers.len(), "Serper offers parsed");
    offers
}

/// Serper price strings carry marketing text ("R$ 3.399,00 agora").
/// Strip everything that is not a digit, comma or dot before handing
/// the string to the shared parser; numbers pass through untouched.
fn parse_serper_price(raw: &Value) -> Option<f64> {
    match raw {
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            crate::price::parse_price_str(&cleaned)
        }
        other => parse_price(other),
    }
}
