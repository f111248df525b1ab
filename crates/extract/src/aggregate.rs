// ABOUTME: Cross-source aggregator: concatenates per-source runs in priority order and dedups.
// ABOUTME: Dedup key is the trimmed, case-sensitive record text; first occurrence wins.

//! Cross-source aggregation.
//!
//! Per-source runs arrive already ordered by the fixed source-priority list
//! (never by completion order) and are concatenated as-is. Deduplication is
//! intentionally conservative: exact equality of the whitespace-trimmed
//! `text` only, case-sensitive. Near-duplicates with minor wording
//! differences are kept as distinct records — a documented limitation, not a
//! defect. The first occurrence retains its original `source_tag`; later
//! duplicates are dropped silently.

use std::collections::HashSet;

use crate::record::CanonicalRecord;

/// Merge per-source record runs into one ordered, deduplicated sequence.
pub fn merge_sources(runs: Vec<Vec<CanonicalRecord>>) -> Vec<CanonicalRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();
    for run in runs {
        for record in run {
            let key = record.text().trim().to_string();
            if seen.insert(key) {
                merged.push(record);
            }
        }
    }
    merged
}
