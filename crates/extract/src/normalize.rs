// ABOUTME: The normalizer: maps RawCandidate bags into fully-populated CanonicalRecords.
// ABOUTME: The single boundary where absent optional fields become the "unknown" sentinel.

//! Normalization.
//!
//! Key behaviors:
//! - Present fields are copied verbatim (trimmed); absent or blank fields
//!   become [`UNKNOWN`].
//! - Ids are `{entity}-{source_tag}-{index}` where the index increases
//!   monotonically per source tag within one pass — unique within one
//!   `ExtractionResult`, not globally.
//! - Pure function of its input; re-normalizing a candidate built from an
//!   already-canonical record reproduces the record's fields.

use std::collections::HashMap;

use crate::record::{CanonicalRecord, EntityKind, HotelRecord, RawCandidate, ReviewRecord, UNKNOWN};

/// Copy a field verbatim, substituting the sentinel for absent or blank values.
fn field_or_unknown(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Map one candidate to a canonical record with the given per-source index.
pub fn canonicalize(candidate: &RawCandidate, index: usize) -> CanonicalRecord {
    let id = format!("{}-{}-{}", candidate.entity, candidate.source_tag, index);
    match candidate.entity {
        EntityKind::Hotel => CanonicalRecord::Hotel(HotelRecord {
            id,
            name: field_or_unknown(&candidate.name),
            address: field_or_unknown(&candidate.address),
            rating: field_or_unknown(&candidate.rating),
            price: field_or_unknown(&candidate.price),
            review_count: field_or_unknown(&candidate.review_count),
            description: field_or_unknown(&candidate.description),
            url: field_or_unknown(&candidate.url),
            image_url: field_or_unknown(&candidate.image_url),
            source_tag: candidate.source_tag.clone(),
        }),
        EntityKind::Review => CanonicalRecord::Review(ReviewRecord {
            id,
            text: field_or_unknown(&candidate.description),
            rating: field_or_unknown(&candidate.rating),
            date: field_or_unknown(&candidate.date),
            author: field_or_unknown(&candidate.author),
            source_tag: candidate.source_tag.clone(),
        }),
    }
}

/// Normalize a candidate sequence, keeping order and counting per source tag.
pub fn normalize(candidates: &[RawCandidate]) -> Vec<CanonicalRecord> {
    let mut counters: HashMap<&str, usize> = HashMap::new();
    candidates
        .iter()
        .map(|c| {
            let counter = counters.entry(c.source_tag.as_str()).or_insert(0);
            let index = *counter;
            *counter += 1;
            canonicalize(c, index)
        })
        .collect()
}
