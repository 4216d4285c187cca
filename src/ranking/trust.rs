//! Store trust adjustment for best-offer selection.
//!
//! Known-reputable stores get a confidence multiplier below 1.0, which
//! lowers their effective price and lets them win ties against unknown
//! storefronts. The effective price exists only for ranking — it is
//! never displayed as the offer's real price.

use crate::types::Offer;

/// Case-insensitive store-name substrings mapped to trust factors in
/// (0, 1]. Lower factor = more trusted. Unknown stores get 1.0.
const TRUSTED_STORES: &[(&str, f64)] = &[
    ("amazon", 0.9),
    ("mercado livre", 0.9),
    ("magazine luiza", 0.9),
    ("magalu", 0.9),
    ("kabum", 0.92),
    ("americanas", 0.95),
    ("casas bahia", 0.95),
    ("fast shop", 0.95),
];

/// Look up the trust factor for a store display name.
///
/// The first matching substring in table order wins; a store matching
/// nothing is unadjusted (1.0).
pub fn trust_factor(store: &str) -> f64 {
    let store_lower = store.to_lowercase();
    TRUSTED_STORES
        .iter()
        .find(|(pattern, _)| store_lower.contains(pattern))
        .map(|(_, factor)| *factor)
        .unwrap_or(1.0)
}

/// Assign `store_trust_factor` and `effective_price` to every offer.
///
/// Offers reaching this point always carry a positive price (adapters
/// drop the rest), so the effective price is simply `price * factor`.
pub fn apply_trust(offers: &mut [Offer]) {
    for offer in offers.iter_mut() {
        offer.store_trust_factor = trust_factor(&offer.store);
        offer.effective_price = offer.price * offer.store_trust_factor;
    }
}
