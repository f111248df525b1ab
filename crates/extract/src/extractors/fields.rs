// ABOUTME: Regex pattern-rule extractors for single attributes inside text/markup fragments.
// ABOUTME: Each attribute has an ordered, named rule list; first match wins; no rule ever raises.

//! Pattern-rule field extraction.
//!
//! Each attribute (rating, price, date, author, address, review count) is
//! extracted by an explicit ordered list of *named* pattern rules rather than
//! inline branching, so a rule can be added, reordered, or removed without
//! touching its neighbors — and each rule is independently testable.
//!
//! Key behaviors:
//! - Markup is stripped and whitespace collapsed before matching.
//! - Rules are tried in order; the first rule whose capture is non-empty wins.
//! - Absence of a match yields `None`, never an error; the normalizer is the
//!   single place that turns absence into the "unknown" sentinel.
//! - Numeric-looking values (rating, price) are returned as raw strings,
//!   preserving the source's textual representation.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// One named pattern attempt within an extractor's rule list.
pub struct PatternRule {
    pub name: &'static str,
    regex: Regex,
}

impl PatternRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        // Rule patterns are static and covered by tests; a bad pattern is a
        // programming error, not a runtime condition.
        Self {
            name,
            regex: Regex::new(pattern).expect("invalid pattern rule"),
        }
    }

    /// First capture group of the first match, trimmed. Empty captures decline.
    fn capture(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        let value = caps.get(1)?.as_str().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// Strip markup tags, decode the common entities, and collapse whitespace.
pub fn strip_markup(fragment: &str) -> String {
    let without_tags = TAG_RE.replace_all(fragment, " ");
    let decoded = without_tags
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn apply(rules: &[PatternRule], fragment: &str) -> Option<String> {
    let text = strip_markup(fragment);
    rules.iter().find_map(|rule| rule.capture(&text))
}

static RATING_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new("slash-five", r"(\d(?:[.,]\d)?)\s*/\s*5"),
        PatternRule::new("out-of-five", r"(?i)(\d(?:[.,]\d)?)\s*out\s*of\s*5"),
        PatternRule::new("stars", r"(?i)(\d(?:[.,]\d)?)\s*stars?\b"),
        PatternRule::new("rated", r"(?i)rat(?:ed|ing)\s*:?\s*(\d(?:[.,]\d)?)"),
        PatternRule::new("bare-decimal", r"\b([0-5][.,]\d)\b"),
    ]
});

static PRICE_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new("currency-symbol", r"([$€£]\s?\d[\d,]*(?:\.\d{2})?)"),
        PatternRule::new("currency-code", r"(?i)\b((?:USD|EUR|GBP)\s?\d[\d,]*(?:\.\d{2})?)"),
        PatternRule::new(
            "per-night",
            r"(?i)(\d[\d,]*(?:\.\d{2})?)\s*(?:per night|/\s*night|a night)",
        ),
    ]
});

static DATE_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new("iso-date", r"\b(\d{4}-\d{2}-\d{2})\b"),
        PatternRule::new(
            "month-day-year",
            r"\b((?:January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept?|Oct|Nov|Dec)\.?\s+\d{1,2},?\s+\d{4})\b",
        ),
        PatternRule::new("relative", r"(?i)\b(\d+\s+(?:day|week|month|year)s?\s+ago)\b"),
        PatternRule::new("slash-date", r"\b(\d{1,2}/\d{1,2}/\d{2,4})\b"),
    ]
});

static AUTHOR_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(
            "reviewed-by",
            r"(?:Reviewed by|reviewed by)\s+([A-Z][\w.'-]*(?:\s+[A-Z][\w.'-]*){0,2})",
        ),
        PatternRule::new(
            "by-line",
            r"\b(?:By|by)\s+([A-Z][\w.'-]*(?:\s+[A-Z][\w.'-]*){0,2})",
        ),
        PatternRule::new("trailing-dash-name", r"[–—-]\s*([A-Z][\w.'-]+(?:\s+[A-Z][\w.'-]+)?)\s*$"),
    ]
});

static ADDRESS_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(
            "street-address",
            r"\b(\d{1,5}\s+[A-Z][\w.'-]*(?:\s+[\w.'-]+){0,4}\s+(?:Street|St\.?|Avenue|Ave\.?|Road|Rd\.?|Boulevard|Blvd\.?|Drive|Dr\.?|Lane|Ln\.?|Way|Plaza|Square))\b",
        ),
        PatternRule::new("labelled", r"(?:Address|Located at)\s*:?\s*([^|\n]{5,120})"),
    ]
});

static REVIEW_COUNT_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new("parenthesized", r"\(([\d,]+)\)\s*(?i:reviews?)?"),
        PatternRule::new("labelled", r"(?i)([\d,]+)\s*reviews?\b"),
    ]
});

/// Extract a rating as a raw string, e.g. `"4.5"` from `"4.5/5"`.
pub fn extract_rating(fragment: &str) -> Option<String> {
    apply(&RATING_RULES, fragment)
}

/// Extract a price as a raw string, currency markers preserved.
pub fn extract_price(fragment: &str) -> Option<String> {
    apply(&PRICE_RULES, fragment)
}

/// Extract a date as a raw string.
///
/// ISO-looking matches are additionally validated as real calendar dates;
/// an invalid one (e.g. `2024-99-99`) declines to the next rule.
pub fn extract_date(fragment: &str) -> Option<String> {
    let text = strip_markup(fragment);
    for rule in DATE_RULES.iter() {
        if let Some(value) = rule.capture(&text) {
            if rule.name == "iso-date" && NaiveDate::parse_from_str(&value, "%Y-%m-%d").is_err() {
                continue;
            }
            return Some(value);
        }
    }
    None
}

/// Extract an author/reviewer name.
pub fn extract_author(fragment: &str) -> Option<String> {
    apply(&AUTHOR_RULES, fragment)
}

/// Extract a street-style address.
pub fn extract_address(fragment: &str) -> Option<String> {
    apply(&ADDRESS_RULES, fragment)
}

/// Extract a review count as a raw string, e.g. `"1,234"`.
pub fn extract_review_count(fragment: &str) -> Option<String> {
    apply(&REVIEW_COUNT_RULES, fragment)
}
