//! Regional price parsing.
//!
//! Provider payloads carry prices in whatever shape the upstream API
//! felt like: plain numbers, "R$ 1.234,56", "1234.56", "59,90", with
//! NBSP padding or currency symbols. This module normalises all of them
//! to a finite `f64` or signals "unparsable" — one bad price must never
//! fail a whole search, so parse failures are logged and return `None`.

use serde_json::Value;

/// Currency symbols stripped before numeric parsing. Order matters:
/// "US$" must be removed before "$".
const CURRENCY_SYMBOLS: &[&str] = &["R$", "US$", "$", "€"];

/// Parse a raw price value of unknown JSON shape.
///
/// Numbers are taken as-is (when finite); strings go through
/// [`parse_price_str`]; anything else is unparsable.
pub fn parse_price(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_price_str(s),
        _ => None,
    }
}

/// Parse a price string in BR or plain-dot regional format.
///
/// Cleaning: currency symbols, NBSP and all whitespace are stripped
/// first. Then:
/// - both "," and "." present → "." is a thousands separator, "," the
///   decimal point ("1.234,56" → 1234.56)
/// - only "," present → "," is the decimal point ("59,90" → 59.90)
/// - otherwise parsed as-is ("1234.56")
///
/// Returns `None` for empty, non-numeric or non-finite input, logging
/// the raw value at warn level.
pub fn parse_price_str(raw: &str) -> Option<f64> {
    let mut s = raw.replace('\u{a0}', " ");
    for sym in CURRENCY_SYMBOLS {
        s = s.replace(sym, "");
    }
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        tracing::warn!(raw, "unparsable price: empty after cleaning");
        return None;
    }

    let normalised = if s.contains(',') && s.contains('.') {
        s.replace('.', "").replace(',', ".")
    } else if s.contains(',') {
        s.replace(',', ".")
    } else {
        s
    };

    match normalised.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            tracing::warn!(raw, "unparsable price");
            None
        }
    }
}
