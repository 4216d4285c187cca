//! Relevance scoring of offer titles against the query profile.
//!
//! Baseline is token overlap: the share of query tokens found as
//! substrings of the normalised title. Domain heuristics then push
//! accessories, cases and games away from console queries, and pull
//! structurally confirmed consoles up. All scores are recomputed here
//! centrally — provider-side scores are never trusted.

use crate::catalog::QueryProfile;
use crate::types::Offer;

/// Words that mark an offer as an accessory rather than the product
/// itself, whatever the query. Matched as substrings of the normalised
/// title.
const GENERIC_BAD_WORDS: &[&str] = &[
    "capa",
    "case",
    "skin",
    "película",
    "pelicula",
    "adesivo",
    "suporte",
];

/// Accessory phrases specific to console families.
const CONSOLE_ACCESSORY_WORDS: &[&str] = &["capa", "controle", "skin", "base carregadora"];

/// Phrases that structurally confirm a title is the console itself and
/// not a game for it. Storage-size tokens ("825gb", "1tb") count too,
/// via [`has_storage_token`].
const CONSOLE_HINTS: &[&str] = &["console", "edição", "edicao", "edition"];

/// Brand-variant spellings collapsed before substring matching, so the
/// registered-trademark glyph forms match the plain slugs. Longer
/// rewrites run first.
const TITLE_REWRITES: &[(&str, &str)] = &[
    ("playstation®5", "playstation 5"),
    ("playstation™5", "playstation 5"),
    ("playstation®4", "playstation 4"),
    ("®", ""),
    ("™", ""),
];

/// Penalty multiplier for generic accessory words.
const BAD_WORD_PENALTY: f64 = 0.2;
/// Penalty multiplier for titles that look like a game, not the console.
const GAME_PENALTY: f64 = 0.05;
/// Penalty multiplier for family-specific accessory phrases.
const ACCESSORY_PENALTY: f64 = 0.01;
/// Flat bonus for a structurally confirmed console title.
const CONSOLE_HINT_BONUS: f64 = 0.2;
/// Flat bonus when the title starts with the first query token.
const LEADING_TOKEN_BONUS: f64 = 0.1;

/// Normalise a title for matching: lowercase and collapse brand-variant
/// spellings so substring checks are stable across encodings.
pub fn normalize_title(title: &str) -> String {
    let mut normalised = title.to_lowercase();
    for (from, to) in TITLE_REWRITES {
        normalised = normalised.replace(from, to);
    }
    normalised
}

/// Whether a normalised title contains a storage-size token such as
/// "825gb" or "1tb" — a strong signal the offer is hardware.
fn has_storage_token(title_norm: &str) -> bool {
    title_norm.split_whitespace().any(|word| {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric());
        ["gb", "tb"].iter().any(|suffix| {
            word.strip_suffix(suffix)
                .is_some_and(|prefix| !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()))
        })
    })
}

/// Whether a normalised title structurally confirms the console itself
/// (as opposed to a game or accessory for it).
pub fn title_confirms_console(title_norm: &str) -> bool {
    CONSOLE_HINTS.iter().any(|hint| title_norm.contains(hint)) || has_storage_token(title_norm)
}

/// Score an offer title against the query profile.
///
/// Baseline: `hits / total_query_tokens` where hits counts distinct
/// query tokens found as substrings of the normalised title. An empty
/// query matches everything (baseline 1.0). Adjustments, in order:
///
/// 1. generic accessory word in title → × 0.2
/// 2. console query and the title looks like a game (mentions the
///    platform without any console hint) → × 0.05
/// 3. console query and family accessory phrase in title → × 0.01
/// 4. console query and console hint present → + 0.2
/// 5. title starts with the first query token → + 0.1
///
/// The result is non-negative and monotonically non-decreasing in the
/// number of matched query tokens.
pub fn score_title(profile: &QueryProfile, title: &str) -> f64 {
    let title_norm = normalize_title(title);

    let mut score = if profile.tokens.is_empty() {
        1.0
    } else {
        let hits = profile
            .tokens
            .iter()
            .filter(|token| title_norm.contains(token.as_str()))
            .count();
        hits as f64 / profile.tokens.len() as f64
    };

    if GENERIC_BAD_WORDS.iter().any(|w| title_norm.contains(w)) {
        score *= BAD_WORD_PENALTY;
    }

    if profile.is_console_query() {
        let mentions_platform = profile
            .family
            .map(|family| family.keywords.iter().any(|kw| title_norm.contains(kw)))
            .unwrap_or(false);
        let confirmed = title_confirms_console(&title_norm);

        if mentions_platform && !confirmed {
            score *= GAME_PENALTY;
        }
        if CONSOLE_ACCESSORY_WORDS.iter().any(|w| title_norm.contains(w)) {
            score *= ACCESSORY_PENALTY;
        }
        if confirmed {
            score += CONSOLE_HINT_BONUS;
        }
    }

    if let Some(first) = profile.tokens.first() {
        if title_norm.starts_with(first.as_str()) {
            score += LEADING_TOKEN_BONUS;
        }
    }

    score
}

/// Score every offer in place and mark those clearing `threshold` as
/// relevant.
pub fn score_offers(profile: &QueryProfile, offers: &mut [Offer], threshold: f64) {
    for offer in offers.iter_mut() {
        offer.relevance_score = score_title(profile, &offer.title);
        offer.relevant = offer.relevance_score >= threshold;
    }
}
