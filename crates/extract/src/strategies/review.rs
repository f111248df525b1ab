// ABOUTME: Review extraction strategies: structured JSON reviews, review-block markup, long-text heuristic.
// ABOUTME: Each strategy is total and stateless; it declines by returning no candidates.

use scraper::{Html, Selector};
use serde_json::{Map, Value};

use crate::envelope::ResponseEnvelope;
use crate::extractors::{fields, html};
use crate::record::{EntityKind, RawCandidate};
use crate::strategies::{find_array, str_field, Strategy};

/// JSON-pointer locations where payloads keep review lists.
const REVIEW_POINTERS: &[&str] = &[
    "/results/reviews",
    "/reviews",
    "/reviews_results",
    "/results",
];

/// Markup anchors for review blocks, most specific first.
const BLOCK_ANCHORS: &[&str] = &[
    "[itemprop='review']",
    "[data-review-id]",
    ".review",
    ".review-item",
    "blockquote",
];

/// Minimum text length for a markup block or fragment to count as a review.
const MIN_REVIEW_LEN: usize = 15;

/// Minimum text length for the generic longest-text heuristic.
const MIN_FRAGMENT_LEN: usize = 60;

/// Highest priority: reviews already parsed into structured JSON.
pub struct StructuredReviews;

impl Strategy for StructuredReviews {
    fn name(&self) -> &'static str {
        "structured-reviews"
    }

    fn extract(&self, envelope: &ResponseEnvelope, source_tag: &str) -> Vec<RawCandidate> {
        let Some(root) = envelope.structured.as_ref() else {
            return Vec::new();
        };
        let Some(items) = find_array(root, REVIEW_POINTERS, &["text", "review", "snippet", "comment"])
        else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| candidate_from_value(item, source_tag))
            .collect()
    }
}

fn candidate_from_value(item: &Value, source_tag: &str) -> Option<RawCandidate> {
    let obj = item.as_object()?;
    let text = str_field(obj, &["text", "review", "snippet", "comment", "body", "content"])?;

    let mut c = RawCandidate::new(EntityKind::Review, source_tag);
    c.description = Some(text);
    c.rating = str_field(obj, &["rating", "score", "stars"]);
    c.date = str_field(obj, &["date", "published", "time", "relative_date"]);
    c.author = author_field(obj);
    Some(c)
}

/// Author may be a plain string or a nested `{"name": ...}` object.
fn author_field(obj: &Map<String, Value>) -> Option<String> {
    str_field(obj, &["author", "user", "reviewer", "username"]).or_else(|| {
        ["author", "user", "reviewer"].iter().find_map(|k| {
            obj.get(*k)
                .and_then(|v| v.as_object())
                .and_then(|o| str_field(o, &["name", "display_name"]))
        })
    })
}

/// Second priority: recognizable review-block markup in an HTML document.
pub struct ReviewBlocks;

impl Strategy for ReviewBlocks {
    fn name(&self) -> &'static str {
        "review-blocks"
    }

    fn extract(&self, envelope: &ResponseEnvelope, source_tag: &str) -> Vec<RawCandidate> {
        let Some(body) = envelope.raw_body.as_deref() else {
            return Vec::new();
        };
        let doc = Html::parse_document(body);
        let blocks = html::select_blocks(&doc, BLOCK_ANCHORS);

        let mut out = Vec::new();
        for block in blocks {
            let text = html::element_text(block);
            if text.len() < MIN_REVIEW_LEN {
                continue;
            }
            let fragment = block.html();

            let mut c = RawCandidate::new(EntityKind::Review, source_tag);
            c.rating = html::first_text_in(block, &["[itemprop='ratingValue']"])
                .or_else(|| fields::extract_rating(&fragment));
            c.date = html::first_attr_in(block, "time", "datetime")
                .or_else(|| html::first_text_in(block, &["time", ".date"]))
                .or_else(|| fields::extract_date(&fragment));
            c.author = html::first_text_in(block, &["[itemprop='author']", ".author", ".reviewer"])
                .or_else(|| fields::extract_author(&fragment));
            c.description = Some(text);
            out.push(c);
        }
        out
    }
}

/// Last resort: harvest long prose fragments anywhere in the document.
///
/// Falls back to the whole body text when no paragraph-level fragment
/// qualifies, which also covers unclassified plain-text payloads.
pub struct LongTextHeuristic;

impl Strategy for LongTextHeuristic {
    fn name(&self) -> &'static str {
        "long-text-heuristic"
    }

    fn extract(&self, envelope: &ResponseEnvelope, source_tag: &str) -> Vec<RawCandidate> {
        let Some(body) = envelope.raw_body.as_deref() else {
            return Vec::new();
        };
        let doc = Html::parse_document(body);

        let mut texts = Vec::new();
        let mut seen = std::collections::HashSet::new();
        if let Ok(sel) = Selector::parse("p, li, blockquote") {
            for el in doc.select(&sel) {
                let text = html::element_text(el);
                if text.len() >= MIN_FRAGMENT_LEN && seen.insert(text.clone()) {
                    texts.push(text);
                }
            }
        }

        if texts.is_empty() {
            if let Ok(sel) = Selector::parse("body") {
                if let Some(el) = doc.select(&sel).next() {
                    let text = html::element_text(el);
                    if text.len() >= MIN_FRAGMENT_LEN {
                        texts.push(text);
                    }
                }
            }
        }

        texts
            .into_iter()
            .map(|text| {
                let mut c = RawCandidate::new(EntityKind::Review, source_tag);
                c.rating = fields::extract_rating(&text);
                c.date = fields::extract_date(&text);
                c.author = fields::extract_author(&text);
                c.description = Some(text);
                c
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_reviews_maps_fields() {
        let env = ResponseEnvelope::from_json(json!({
            "results": {
                "reviews": [
                    {
                        "text": "Ocean view was great",
                        "rating": 5,
                        "date": "2024-03-15",
                        "author": {"name": "Jane"}
                    },
                    {"snippet": "Rude staff", "reviewer": "Bob"},
                    {"rating": 2}
                ]
            }
        }));

        let found = StructuredReviews.extract(&env, "google_travel");
        assert_eq!(found.len(), 2);

        assert_eq!(found[0].description.as_deref(), Some("Ocean view was great"));
        assert_eq!(found[0].rating.as_deref(), Some("5"));
        assert_eq!(found[0].date.as_deref(), Some("2024-03-15"));
        assert_eq!(found[0].author.as_deref(), Some("Jane"));
        assert_eq!(found[0].source_tag, "google_travel");

        assert_eq!(found[1].description.as_deref(), Some("Rude staff"));
        assert_eq!(found[1].author.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_structured_reviews_declines_on_html() {
        let env = ResponseEnvelope::from_body("<html><p>Ocean view was great</p></html>");
        assert!(StructuredReviews.extract(&env, "google_travel").is_empty());
    }

    #[test]
    fn test_review_blocks_from_markup() {
        let body = r#"
            <html><body>
                <div class="review">
                    <span class="author">Jane D.</span>
                    <time datetime="2024-03-15">March 15, 2024</time>
                    <span>5/5</span>
                    <p>Ocean view was great, breakfast was excellent.</p>
                </div>
                <div class="review"><p>short</p></div>
            </body></html>
        "#;
        let env = ResponseEnvelope::from_body(body);
        let found = ReviewBlocks.extract(&env, "google_travel_html");
        assert_eq!(found.len(), 1);
        let c = &found[0];
        assert!(c
            .description
            .as_deref()
            .unwrap()
            .contains("Ocean view was great"));
        assert_eq!(c.rating.as_deref(), Some("5"));
        assert_eq!(c.date.as_deref(), Some("2024-03-15"));
        assert_eq!(c.author.as_deref(), Some("Jane D."));
    }

    #[test]
    fn test_long_text_heuristic_picks_prose_fragments() {
        let long_a = "The rooms were spotless and the staff went out of their way to help us settle in.";
        let body = format!(
            "<html><body><p>nav</p><p>{}</p><p>{}</p></body></html>",
            long_a, long_a
        );
        let env = ResponseEnvelope::from_body(&body);
        let found = LongTextHeuristic.extract(&env, "google_travel_html");
        // Duplicate fragments collapse; short chrome is skipped.
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description.as_deref(), Some(long_a));
    }

    #[test]
    fn test_long_text_heuristic_body_fallback() {
        let text = "A single run-on block of review prose without any paragraph markup at all, long enough to qualify.";
        let body = format!("<html><body>{}</body></html>", text);
        let env = ResponseEnvelope::from_body(&body);
        let found = LongTextHeuristic.extract(&env, "src");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description.as_deref(), Some(text));
    }

    #[test]
    fn test_long_text_heuristic_declines_on_short_noise() {
        let env = ResponseEnvelope::from_body("<html><body><p>hi</p></body></html>");
        assert!(LongTextHeuristic.extract(&env, "src").is_empty());
    }
}
