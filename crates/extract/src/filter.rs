// ABOUTME: Relevance filter: case-insensitive OR substring matching against a keyword set.
// ABOUTME: An empty keyword set passes everything; a matchless non-empty set yields one sentinel record.

//! Relevance filtering.
//!
//! Key behaviors:
//! - OR semantics: a record survives if its text contains at least one
//!   keyword as a case-folded substring.
//! - An empty keyword set makes the filter a no-op.
//! - A non-empty keyword set with zero survivors replaces the entire output
//!   with a single `no-match` sentinel record that carries the attempted
//!   keywords in its text, so downstream consumers can tell "nothing matched"
//!   from "fetch failed".

use aho_corasick::AhoCorasick;

use crate::normalize::canonicalize;
use crate::record::{CanonicalRecord, EntityKind, RawCandidate, SOURCE_NO_MATCH};

/// Lowercase, trim, and drop empty entries from a raw keyword list.
pub fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Retain records whose text contains at least one keyword (case-folded).
///
/// Keywords must already be normalized. Returns the input untouched when the
/// keyword set is empty. Never substitutes the sentinel; see
/// [`filter_by_keywords`] for the full contract.
pub fn retain_matching(records: Vec<CanonicalRecord>, keywords: &[String]) -> Vec<CanonicalRecord> {
    if keywords.is_empty() {
        return records;
    }

    match AhoCorasick::new(keywords) {
        Ok(ac) => records
            .into_iter()
            .filter(|r| ac.is_match(&r.text().to_lowercase()))
            .collect(),
        // Automaton construction only fails on pathological pattern sets;
        // degrade to a plain substring scan rather than dropping everything.
        Err(_) => records
            .into_iter()
            .filter(|r| {
                let haystack = r.text().to_lowercase();
                keywords.iter().any(|k| haystack.contains(k))
            })
            .collect(),
    }
}

/// Build the sentinel record substituted when nothing matched.
pub fn no_match_sentinel(entity: EntityKind, keywords: &[String]) -> CanonicalRecord {
    let listed = keywords.join(", ");
    let mut c = RawCandidate::new(entity, SOURCE_NO_MATCH);
    match entity {
        EntityKind::Hotel => {
            c.name = Some(format!("No hotels matched the requested keywords: {}", listed));
        }
        EntityKind::Review => {
            c.description = Some(format!(
                "No reviews matched the requested keywords: {}",
                listed
            ));
        }
    }
    canonicalize(&c, 0)
}

/// Apply the full relevance-filter contract to a record sequence.
pub fn filter_by_keywords(
    records: Vec<CanonicalRecord>,
    keywords: &[String],
    entity: EntityKind,
) -> Vec<CanonicalRecord> {
    if keywords.is_empty() {
        return records;
    }
    let retained = retain_matching(records, keywords);
    if retained.is_empty() {
        vec![no_match_sentinel(entity, keywords)]
    } else {
        retained
    }
}
