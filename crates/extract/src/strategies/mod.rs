// ABOUTME: Strategy chain machinery: the Strategy trait, per-entity chains, and run_chain.
// ABOUTME: Strategies are tried in fixed priority order; the first one yielding candidates wins.

//! Extraction strategies.
//!
//! A strategy is one self-contained extraction algorithm for one entity type.
//! Chains are fixed ordered lists; [`run_chain`] stops at the first strategy
//! producing at least one candidate, so lower-priority heuristics are never
//! consulted when a structured source matched. Strategies are stateless and
//! total: malformed input means "no candidates", never an error, and no
//! strategy consults or mutates state from a sibling.
//!
//! Ordering policy per entity: parsed-JSON fields first, then known markup
//! anchors, then generic longest-text heuristics (highest false-positive
//! risk last).

pub mod hotel;
pub mod review;

use serde_json::{Map, Value};

use crate::envelope::ResponseEnvelope;
use crate::record::{EntityKind, RawCandidate};

/// One self-contained extraction algorithm for one entity type.
pub trait Strategy: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Extract zero or more candidates from the envelope, stamping each with
    /// `source_tag`. Must be total: never raises on malformed input.
    fn extract(&self, envelope: &ResponseEnvelope, source_tag: &str) -> Vec<RawCandidate>;
}

/// Build the fixed-priority strategy chain for an entity kind.
pub fn chain_for(entity: EntityKind) -> Vec<Box<dyn Strategy>> {
    match entity {
        EntityKind::Hotel => vec![
            Box::new(hotel::StructuredHotels),
            Box::new(hotel::HotelCards),
            Box::new(hotel::HeadingHeuristic),
        ],
        EntityKind::Review => vec![
            Box::new(review::StructuredReviews),
            Box::new(review::ReviewBlocks),
            Box::new(review::LongTextHeuristic),
        ],
    }
}

/// Run a chain against one envelope, stopping at the first non-empty yield.
pub fn run_chain(
    chain: &[Box<dyn Strategy>],
    envelope: &ResponseEnvelope,
    source_tag: &str,
) -> Vec<RawCandidate> {
    for strategy in chain {
        let found = strategy.extract(envelope, source_tag);
        if !found.is_empty() {
            tracing::debug!(
                strategy = strategy.name(),
                source = source_tag,
                count = found.len(),
                "strategy produced candidates"
            );
            return found;
        }
    }
    tracing::debug!(source = source_tag, "no strategy produced candidates");
    Vec::new()
}

/// Coerce a JSON leaf to a trimmed non-empty string.
///
/// Numbers keep their textual representation; arrays, objects, booleans and
/// nulls decline — a field extractor never guesses at compound values.
pub(crate) fn coerce_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(t.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First present key from `keys` that coerces to a string.
pub(crate) fn str_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| obj.get(*k).and_then(coerce_str))
}

fn array_qualifies(arr: &[Value], any_key: &[&str]) -> bool {
    arr.iter().any(|v| {
        v.as_object()
            .map_or(false, |o| any_key.iter().any(|k| o.contains_key(*k)))
    })
}

/// Locate the entity array inside an arbitrary structured payload.
///
/// Known JSON-pointer locations are tried first, then the root itself, then a
/// shallow scan of nested objects. An array only qualifies if at least one
/// element is an object carrying one of `any_key`.
pub(crate) fn find_array<'a>(
    root: &'a Value,
    pointers: &[&str],
    any_key: &[&str],
) -> Option<&'a Vec<Value>> {
    for p in pointers {
        if let Some(arr) = root.pointer(p).and_then(Value::as_array) {
            if array_qualifies(arr, any_key) {
                return Some(arr);
            }
        }
    }
    if let Some(arr) = root.as_array() {
        if array_qualifies(arr, any_key) {
            return Some(arr);
        }
    }
    scan_for_array(root, any_key, 2)
}

fn scan_for_array<'a>(value: &'a Value, any_key: &[&str], depth: u8) -> Option<&'a Vec<Value>> {
    if depth == 0 {
        return None;
    }
    let obj = value.as_object()?;
    for v in obj.values() {
        if let Some(arr) = v.as_array() {
            if array_qualifies(arr, any_key) {
                return Some(arr);
            }
        }
    }
    for v in obj.values() {
        if let Some(found) = scan_for_array(v, any_key, depth - 1) {
            return Some(found);
        }
    }
    None
}
