// ABOUTME: Record types flowing through the pipeline: RawCandidate, CanonicalRecord, ExtractionResult.
// ABOUTME: Canonical records never have absent fields; missing values carry the "unknown" sentinel.

//! Record schema.
//!
//! Extraction runs in two stages: strategies emit partially-populated
//! [`RawCandidate`] bags, and the normalizer maps them into fully-populated
//! [`CanonicalRecord`] values. Every canonical field is a `String` holding
//! either the verbatim extracted text or the [`UNKNOWN`] sentinel — downstream
//! consumers never see an absent field. Numeric-looking fields (rating, price,
//! review_count) deliberately stay textual; interpreting them is the ranking
//! layer's concern.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Sentinel value for a field no extractor could populate.
pub const UNKNOWN: &str = "unknown";

/// Source tag carried by synthesized placeholder records.
pub const SOURCE_SYNTHESIZED: &str = "synthesized";

/// Source tag carried by the relevance filter's no-match sentinel.
pub const SOURCE_NO_MATCH: &str = "no-match";

/// The entity type an extraction pass is hunting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Hotel,
    Review,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityKind::Hotel => "hotel",
            EntityKind::Review => "review",
        };
        write!(f, "{}", s)
    }
}

/// A partially-populated record produced by one strategy.
///
/// Ephemeral: produced and consumed within a single extraction pass.
/// `source_tag` is mandatory; everything else is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCandidate {
    pub entity: EntityKind,
    pub source_tag: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub rating: Option<String>,
    pub price: Option<String>,
    pub review_count: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

impl RawCandidate {
    pub fn new(entity: EntityKind, source_tag: impl Into<String>) -> Self {
        Self {
            entity,
            source_tag: source_tag.into(),
            ..Default::default()
        }
    }
}

/// A fully-populated hotel record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: String,
    pub price: String,
    pub review_count: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub source_tag: String,
}

/// A fully-populated review record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: String,
    pub text: String,
    pub rating: String,
    pub date: String,
    pub author: String,
    pub source_tag: String,
}

/// The canonical record schema: one variant per entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CanonicalRecord {
    Hotel(HotelRecord),
    Review(ReviewRecord),
}

impl CanonicalRecord {
    pub fn entity(&self) -> EntityKind {
        match self {
            CanonicalRecord::Hotel(_) => EntityKind::Hotel,
            CanonicalRecord::Review(_) => EntityKind::Review,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CanonicalRecord::Hotel(h) => &h.id,
            CanonicalRecord::Review(r) => &r.id,
        }
    }

    pub fn source_tag(&self) -> &str {
        match self {
            CanonicalRecord::Hotel(h) => &h.source_tag,
            CanonicalRecord::Review(r) => &r.source_tag,
        }
    }

    /// The identifying text of the record: review text, or hotel name.
    ///
    /// This is the relevance-filter haystack and the deduplication key.
    /// Invariant: always a non-empty string.
    pub fn text(&self) -> &str {
        match self {
            CanonicalRecord::Hotel(h) => &h.name,
            CanonicalRecord::Review(r) => &r.text,
        }
    }

    /// Map a canonical record back into candidate form.
    ///
    /// `UNKNOWN` fields become present `Some(UNKNOWN)` values, so running the
    /// normalizer over the result reproduces the original fields.
    pub fn to_candidate(&self) -> RawCandidate {
        match self {
            CanonicalRecord::Hotel(h) => RawCandidate {
                entity: EntityKind::Hotel,
                source_tag: h.source_tag.clone(),
                name: Some(h.name.clone()),
                address: Some(h.address.clone()),
                rating: Some(h.rating.clone()),
                price: Some(h.price.clone()),
                review_count: Some(h.review_count.clone()),
                description: Some(h.description.clone()),
                url: Some(h.url.clone()),
                image_url: Some(h.image_url.clone()),
                ..Default::default()
            },
            CanonicalRecord::Review(r) => RawCandidate {
                entity: EntityKind::Review,
                source_tag: r.source_tag.clone(),
                description: Some(r.text.clone()),
                rating: Some(r.rating.clone()),
                date: Some(r.date.clone()),
                author: Some(r.author.clone()),
                ..Default::default()
            },
        }
    }
}

/// The pipeline's final output: an ordered record sequence plus metadata.
///
/// Invariant: `total_count == records.len()`, and the pipeline never returns
/// a result with `total_count == 0` — the fallback synthesizer exists to
/// uphold that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub records: Vec<CanonicalRecord>,
    pub total_count: usize,
    pub sources: BTreeSet<String>,
}

impl ExtractionResult {
    /// Build a result from an ordered record sequence, deriving the metadata.
    pub fn new(records: Vec<CanonicalRecord>) -> Self {
        let sources = records
            .iter()
            .map(|r| r.source_tag().to_string())
            .collect();
        let total_count = records.len();
        Self {
            records,
            total_count,
            sources,
        }
    }

    /// True when every record was synthesized rather than scraped.
    pub fn is_synthesized(&self) -> bool {
        !self.records.is_empty()
            && self
                .records
                .iter()
                .all(|r| r.source_tag() == SOURCE_SYNTHESIZED)
    }
}
