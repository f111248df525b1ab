// ABOUTME: Hotel extraction strategies: structured JSON fields, markup card anchors, heading heuristic.
// ABOUTME: Each strategy is total and stateless; it declines by returning no candidates.

use scraper::{Html, Selector};
use serde_json::Value;

use crate::envelope::ResponseEnvelope;
use crate::extractors::{fields, html};
use crate::record::{EntityKind, RawCandidate};
use crate::strategies::{coerce_str, find_array, str_field, Strategy};

/// JSON-pointer locations where SERP-style payloads keep hotel listings.
const HOTEL_POINTERS: &[&str] = &[
    "/results/hotels",
    "/hotels",
    "/results/properties",
    "/properties",
    "/organic_results",
];

/// Markup anchors for hotel cards, most specific first.
const CARD_ANCHORS: &[&str] = &[
    "[itemtype*='Hotel']",
    "[data-hotel-id]",
    ".hotel-card",
    "article.hotel",
    "div[role='listitem']",
];

const NAME_SELECTORS: &[&str] = &["[itemprop='name']", "h1", "h2", "h3", ".hotel-name"];

/// Highest priority: listings already parsed into structured JSON.
pub struct StructuredHotels;

impl Strategy for StructuredHotels {
    fn name(&self) -> &'static str {
        "structured-hotels"
    }

    fn extract(&self, envelope: &ResponseEnvelope, source_tag: &str) -> Vec<RawCandidate> {
        let Some(root) = envelope.structured.as_ref() else {
            return Vec::new();
        };
        let Some(items) = find_array(root, HOTEL_POINTERS, &["name", "title"]) else {
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
    let name = str_field(obj, &["name", "title"])?;

    let mut c = RawCandidate::new(EntityKind::Hotel, source_tag);
    c.name = Some(name);
    c.address = str_field(obj, &["address", "vicinity", "location"]);
    c.rating = str_field(obj, &["rating", "overall_rating", "score"]);
    c.price = str_field(obj, &["price", "rate", "price_per_night"]).or_else(|| {
        // SERP payloads sometimes nest the nightly rate.
        obj.get("rate_per_night")
            .and_then(|v| v.get("lowest"))
            .and_then(coerce_str)
    });
    c.review_count = str_field(obj, &["reviews", "review_count", "reviews_count", "user_ratings_total"]);
    c.description = str_field(obj, &["description", "snippet", "about"]);
    c.url = str_field(obj, &["url", "link", "website"]);
    c.image_url = str_field(obj, &["image", "thumbnail", "image_url"]);
    Some(c)
}

/// Second priority: recognizable hotel-card markup in an HTML document.
pub struct HotelCards;

impl Strategy for HotelCards {
    fn name(&self) -> &'static str {
        "hotel-cards"
    }

    fn extract(&self, envelope: &ResponseEnvelope, source_tag: &str) -> Vec<RawCandidate> {
        let Some(body) = envelope.raw_body.as_deref() else {
            return Vec::new();
        };
        let doc = Html::parse_document(body);
        let cards = html::select_blocks(&doc, CARD_ANCHORS);

        let mut out = Vec::new();
        for card in cards {
            let Some(name) = html::first_text_in(card, NAME_SELECTORS) else {
                continue;
            };
            if name.len() > 120 {
                continue;
            }
            let fragment = card.html();

            let mut c = RawCandidate::new(EntityKind::Hotel, source_tag);
            c.name = Some(name);
            c.rating = html::first_text_in(card, &["[itemprop='ratingValue']"])
                .or_else(|| fields::extract_rating(&fragment));
            c.price = fields::extract_price(&fragment);
            c.address = html::first_text_in(card, &["[itemprop='address']", ".address"])
                .or_else(|| fields::extract_address(&fragment));
            c.review_count = fields::extract_review_count(&fragment);
            c.description = html::first_text_in(card, &[".description", "p"]);
            c.url = html::first_attr_in(card, "a", "href");
            c.image_url = html::first_attr_in(card, "img", "src");
            out.push(c);
        }
        out
    }
}

/// Last resort: treat document headings as probable property names.
///
/// High false-positive risk, which is why it sits at the end of the chain.
pub struct HeadingHeuristic;

impl Strategy for HeadingHeuristic {
    fn name(&self) -> &'static str {
        "heading-heuristic"
    }

    fn extract(&self, envelope: &ResponseEnvelope, source_tag: &str) -> Vec<RawCandidate> {
        let Some(body) = envelope.raw_body.as_deref() else {
            return Vec::new();
        };
        let doc = Html::parse_document(body);
        let Ok(sel) = Selector::parse("h1, h2, h3") else {
            return Vec::new();
        };

        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for el in doc.select(&sel) {
            let name = html::element_text(el);
            if name.len() < 3 || name.len() > 120 {
                continue;
            }
            if !seen.insert(name.clone()) {
                continue;
            }
            let mut c = RawCandidate::new(EntityKind::Hotel, source_tag);
            c.name = Some(name);
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_hotels_maps_fields() {
        let env = ResponseEnvelope::from_json(json!({
            "results": {
                "hotels": [
                    {
                        "name": "Grand Budapest",
                        "address": "1 Alpine Way",
                        "rating": 4.7,
                        "price": "$250",
                        "reviews": 1832,
                        "link": "https://example.com/gb"
                    },
                    {"title": "Seaside Inn", "rate_per_night": {"lowest": "$99"}},
                    {"rating": 3.0}
                ]
            }
        }));

        let found = StructuredHotels.extract(&env, "google");
        assert_eq!(found.len(), 2);

        assert_eq!(found[0].name.as_deref(), Some("Grand Budapest"));
        assert_eq!(found[0].rating.as_deref(), Some("4.7"));
        assert_eq!(found[0].price.as_deref(), Some("$250"));
        assert_eq!(found[0].review_count.as_deref(), Some("1832"));
        assert_eq!(found[0].url.as_deref(), Some("https://example.com/gb"));
        assert_eq!(found[0].source_tag, "google");

        assert_eq!(found[1].name.as_deref(), Some("Seaside Inn"));
        assert_eq!(found[1].price.as_deref(), Some("$99"));
    }

    #[test]
    fn test_structured_hotels_declines_without_structured_payload() {
        let env = ResponseEnvelope::from_body("<html><h2>Grand Budapest</h2></html>");
        assert!(StructuredHotels.extract(&env, "google").is_empty());
    }

    #[test]
    fn test_hotel_cards_from_markup() {
        let body = r#"
            <html><body>
                <div class="hotel-card">
                    <h2>Grand Budapest</h2>
                    <span class="address">1 Alpine Way</span>
                    <span>4.7/5 (1,832 reviews)</span>
                    <span>from $250 per night</span>
                    <a href="/hotels/gb">book</a>
                    <img src="/img/gb.jpg">
                </div>
                <div class="hotel-card"><p>no name here</p></div>
            </body></html>
        "#;
        let env = ResponseEnvelope::from_body(body);
        let found = HotelCards.extract(&env, "booking");
        assert_eq!(found.len(), 1);
        let c = &found[0];
        assert_eq!(c.name.as_deref(), Some("Grand Budapest"));
        assert_eq!(c.address.as_deref(), Some("1 Alpine Way"));
        assert_eq!(c.rating.as_deref(), Some("4.7"));
        assert_eq!(c.price.as_deref(), Some("$250"));
        assert_eq!(c.review_count.as_deref(), Some("1,832"));
        assert_eq!(c.url.as_deref(), Some("/hotels/gb"));
        assert_eq!(c.image_url.as_deref(), Some("/img/gb.jpg"));
    }

    #[test]
    fn test_heading_heuristic_dedupes_and_bounds() {
        let body = format!(
            "<html><body><h1>Grand Budapest</h1><h2>Grand Budapest</h2><h2>ab</h2><h3>{}</h3><h2>Seaside Inn</h2></body></html>",
            "x".repeat(200)
        );
        let env = ResponseEnvelope::from_body(&body);
        let found = HeadingHeuristic.extract(&env, "google");
        let names: Vec<_> = found.iter().filter_map(|c| c.name.as_deref()).collect();
        assert_eq!(names, vec!["Grand Budapest", "Seaside Inn"]);
    }
}
