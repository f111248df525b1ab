// ABOUTME: staysift-extract: resilient hotel and review extraction from heterogeneous scraped payloads.
// ABOUTME: Classifies payloads, runs cascading strategy chains, normalizes, filters, merges, and falls back.

//! Resilient extraction of hotel listings and guest reviews from scraped
//! web payloads.
//!
//! The same target can answer with structured JSON one day and raw HTML the
//! next, so extraction is organized as a cascade: classify the payload, try
//! a fixed chain of strategies from most precise to most heuristic, and take
//! the first non-empty yield. Results from multiple sources are normalized
//! into canonical records, filtered by caller keywords, merged in source
//! priority order with text-level deduplication, and — when everything else
//! fails — replaced by a clearly-labelled synthesized placeholder, so a
//! valid request always produces at least one record.
//!
//! Quick start:
//!
//! ```
//! use staysift_extract::{extract, EntityKind, RequestContext, ResponseEnvelope};
//!
//! let mut context = RequestContext::new();
//! context.insert("location".to_string(), "Lisbon".to_string());
//!
//! let envelopes = vec![(
//!     "google".to_string(),
//!     ResponseEnvelope::from_body(r#"{"hotels": [{"name": "Grand Budapest", "rating": 4.7}]}"#),
//! )];
//!
//! let result = extract(EntityKind::Hotel, &envelopes, &[], &context).unwrap();
//! assert_eq!(result.total_count, 1);
//! ```

pub mod aggregate;
pub mod client;
pub mod envelope;
pub mod error;
pub mod extractors;
pub mod filter;
pub mod normalize;
pub mod options;
pub mod pipeline;
pub mod record;
pub mod strategies;
pub mod synth;

pub use client::{travel_search_url, ProxyClient, ResponseFormat, SourceOptions, SourceSpec};
pub use envelope::{PayloadKind, ResponseEnvelope};
pub use error::{ErrorCode, ExtractError, FetchError};
pub use options::{ClientBuilder, Options};
pub use pipeline::{extract, Pipeline, RequestContext};
pub use record::{
    CanonicalRecord, EntityKind, ExtractionResult, HotelRecord, RawCandidate, ReviewRecord,
    SOURCE_NO_MATCH, SOURCE_SYNTHESIZED, UNKNOWN,
};
