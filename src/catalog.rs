//! Product-family catalog and query classification.
//!
//! A small static table of known product families (consoles, phones)
//! gives the ranking heuristics their category/brand hints. The
//! classifier is deliberately substring-based rather than tokenised so
//! that multi-word keywords like "xbox series x" match as phrases.

/// A known product family the classifier can recognise in a query.
#[derive(Debug)]
pub struct ProductFamily {
    /// Stable slug, e.g. "ps5".
    pub slug: &'static str,
    /// Human-readable name, e.g. "PlayStation 5".
    pub display_name: &'static str,
    /// Coarse category: "console" or "phone".
    pub category: &'static str,
    /// Brand slug, e.g. "playstation".
    pub brand: &'static str,
    /// Lowercase keyword phrases whose presence in a query suggests
    /// this family. Matched as substrings against the lowered query.
    pub keywords: &'static [&'static str],
}

/// The static family catalog. Table order is the tie-break order:
/// when two families score equally, the earlier entry wins.
pub static FAMILIES: &[ProductFamily] = &[
    // Consoles
    ProductFamily {
        slug: "ps5",
        display_name: "PlayStation 5",
        category: "console",
        brand: "playstation",
        keywords: &["ps5", "playstation 5", "playstation®5", "ps 5"],
    },
    ProductFamily {
        slug: "ps4",
        display_name: "PlayStation 4",
        category: "console",
        brand: "playstation",
        keywords: &["ps4", "playstation 4", "ps 4"],
    },
    ProductFamily {
        slug: "xbox-series-x",
        display_name: "Xbox Series X",
        category: "console",
        brand: "xbox",
        keywords: &["xbox series x", "series x", "xsx"],
    },
    ProductFamily {
        slug: "xbox-series-s",
        display_name: "Xbox Series S",
        category: "console",
        brand: "xbox",
        keywords: &["xbox series s", "series s", "xss"],
    },
    // Phones
    ProductFamily {
        slug: "iphone-13",
        display_name: "iPhone 13",
        category: "phone",
        brand: "apple",
        keywords: &["iphone 13", "iphone13", "iphone 13 128gb", "iphone 13 256gb"],
    },
    ProductFamily {
        slug: "iphone-14",
        display_name: "iPhone 14",
        category: "phone",
        brand: "apple",
        keywords: &["iphone 14", "iphone14"],
    },
];

/// The semantic profile derived from a raw query, once per search.
#[derive(Debug, Clone)]
pub struct QueryProfile {
    /// The query exactly as received.
    pub raw_query: String,
    /// Lowercased whitespace-split query words.
    pub tokens: Vec<String>,
    /// The recognised product family, if any keyword matched.
    pub family: Option<&'static ProductFamily>,
}

impl QueryProfile {
    /// Category hint from the recognised family, if any.
    pub fn category(&self) -> Option<&'static str> {
        self.family.map(|f| f.category)
    }

    /// Brand hint from the recognised family, if any.
    pub fn brand(&self) -> Option<&'static str> {
        self.family.map(|f| f.brand)
    }

    /// Family slug hint, if any.
    pub fn family_slug(&self) -> Option<&'static str> {
        self.family.map(|f| f.slug)
    }

    /// Whether the query asks for a console — the strict category that
    /// needs structural confirmation (console, not game or accessory).
    pub fn is_console_query(&self) -> bool {
        self.category() == Some("console")
    }
}

/// Classify a raw query against the family catalog.
///
/// Each family scores one point per keyword phrase appearing as a
/// substring of the lowered query. The strictly highest score wins;
/// ties keep the first family in table order. A query matching nothing
/// yields a profile with no family hints, which degrades scoring to
/// pure token overlap.
pub fn classify_query(query: &str) -> QueryProfile {
    let q_lower = query.to_lowercase();
    let tokens: Vec<String> = q_lower.split_whitespace().map(str::to_owned).collect();

    let mut best_match: Option<&'static ProductFamily> = None;
    let mut best_score = 0usize;

    for family in FAMILIES {
        let score = family
            .keywords
            .iter()
            .filter(|kw| q_lower.contains(*kw))
            .count();
        if score > best_score {
            best_score = score;
            best_match = Some(family);
        }
    }

    QueryProfile {
        raw_query: query.to_owned(),
        tokens,
        family: best_match,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ps5_query_classified_as_console() {
        let profile = classify_query("ps5");
        assert_eq!(profile.family_slug(), Some("ps5"));
        assert_eq!(profile.category(), Some("console"));
        assert_eq!(profile.brand(), Some("playstation"));
        assert!(profile.is_console_query());
    }

    #[test]
    fn multi_word_keyword_matches_as_phrase() {
        let profile = classify_query("console xbox series x novo");
        assert_eq!(profile.family_slug(), Some("xbox-series-x"));
    }

    #[test]
    fn iphone_query_classified_as_phone() {
        let profile = classify_query("iphone 13 128gb");
        assert_eq!(profile.family_slug(), Some("iphone-13"));
        assert_eq!(profile.category(), Some("phone"));
        assert!(!profile.is_console_query());
    }

    #[test]
    fn unknown_query_has_no_hints() {
        let profile = classify_query("batedeira planetária 500w");
        assert!(profile.family.is_none());
        assert_eq!(profile.category(), None);
        assert_eq!(profile.brand(), None);
        assert_eq!(profile.family_slug(), None);
    }

    #[test]
    fn tokens_are_lowercased_and_split() {
        let profile = classify_query("PlayStation 5 Digital");
        assert_eq!(profile.tokens, vec!["playstation", "5", "digital"]);
        assert_eq!(profile.raw_query, "PlayStation 5 Digital");
    }

    #[test]
    fn empty_query_yields_empty_tokens() {
        let profile = classify_query("");
        assert!(profile.tokens.is_empty());
        assert!(profile.family.is_none());
    }

    #[test]
    fn higher_keyword_count_wins() {
        // "iphone 13 128gb" hits two iphone-13 keywords ("iphone 13" and
        // "iphone 13 128gb") and none of iphone-14's, so iphone-13 wins.
        let profile = classify_query("iphone 13 128gb");
        assert_eq!(profile.family_slug(), Some("iphone-13"));
    }

    #[test]
    fn tie_keeps_first_family_in_table_order() {
        // "playstation" alone matches nothing; "ps 5 ps 4" hits one
        // keyword of ps5 and one of ps4 — the tie keeps ps5, the earlier
        // table entry.
        let profile = classify_query("ps 5 ps 4");
        assert_eq!(profile.family_slug(), Some("ps5"));
    }

    #[test]
    fn trademark_glyph_keyword_matches() {
        let profile = classify_query("console playstation®5 825gb");
        assert_eq!(profile.family_slug(), Some("ps5"));
    }
}
