// ABOUTME: Fallback synthesizer: deterministic placeholder records when every strategy yields nothing.
// ABOUTME: Placeholders carry source_tag "synthesized" so callers can tell them from scraped data.

//! Fallback synthesis.
//!
//! Invoked only when the aggregated, filtered sequence is empty after every
//! real source was attempted. Produces exactly one deterministic placeholder
//! per entity kind, interpolating the caller-supplied request context, and
//! never pretends to be real data: `source_tag = "synthesized"` is the
//! caller's signal.

use crate::normalize::canonicalize;
use crate::pipeline::RequestContext;
use crate::record::{CanonicalRecord, EntityKind, RawCandidate, SOURCE_SYNTHESIZED};

fn context_value<'a>(context: &'a RequestContext, key: &str, fallback: &'a str) -> &'a str {
    match context.get(key).map(String::as_str) {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

/// Produce the deterministic placeholder record for an entity kind.
pub fn synthesize(entity: EntityKind, context: &RequestContext) -> CanonicalRecord {
    let location = context_value(context, "location", "the requested location");
    let hotel = context_value(context, "hotel_name", "the requested hotel");

    let mut c = RawCandidate::new(entity, SOURCE_SYNTHESIZED);
    match entity {
        EntityKind::Hotel => {
            c.name = Some(format!("Sample hotel in {}", location));
            c.description = Some(format!(
                "Placeholder listing generated because no hotels could be extracted for {}.",
                location
            ));
        }
        EntityKind::Review => {
            c.description = Some(format!(
                "No reviews could be retrieved for {} in {}.",
                hotel, location
            ));
        }
    }
    canonicalize(&c, 0)
}
