// ABOUTME: End-to-end pipeline tests over realistic JSON, HTML, and garbage payloads.
// ABOUTME: Exercises the full classify -> extract -> normalize -> filter -> merge -> fallback path.

use staysift_extract::{
    extract, CanonicalRecord, EntityKind, PayloadKind, Pipeline, RequestContext, ResponseEnvelope,
    SOURCE_NO_MATCH, SOURCE_SYNTHESIZED, UNKNOWN,
};

fn hotel_context() -> RequestContext {
    let mut cx = RequestContext::new();
    cx.insert("location".to_string(), "Lisbon".to_string());
    cx
}

fn review_context() -> RequestContext {
    let mut cx = hotel_context();
    cx.insert("hotel_name".to_string(), "Grand Budapest".to_string());
    cx
}

const SERP_HOTELS: &str = r#"{
    "results": {
        "hotels": [
            {"name": "Grand Budapest", "rating": 4.7, "price": "$189", "reviews": 1832,
             "address": "1 Alpine Way", "link": "https://example.com/gb"},
            {"name": "Hotel Zissou", "rating": 4.1},
            {"not_a_hotel": true}
        ]
    }
}"#;

const TRAVEL_HTML: &str = r#"<!DOCTYPE html>
<html><body>
  <div class="review">
    <span class="author">Jane D.</span>
    <time datetime="2024-03-15">March 15, 2024</time>
    <span>Rated 5/5</span>
    <p>Ocean view was great, breakfast was excellent.</p>
  </div>
  <div class="review">
    <p>Clean rooms, great staff</p>
  </div>
</body></html>"#;

#[test]
fn hotel_search_over_structured_payload() {
    let envelopes = vec![(
        "google".to_string(),
        ResponseEnvelope::from_body(SERP_HOTELS),
    )];
    let result = extract(EntityKind::Hotel, &envelopes, &[], &hotel_context()).unwrap();

    assert_eq!(result.total_count, 2);
    match &result.records[0] {
        CanonicalRecord::Hotel(h) => {
            assert_eq!(h.id, "hotel-google-0");
            assert_eq!(h.name, "Grand Budapest");
            assert_eq!(h.rating, "4.7");
            assert_eq!(h.price, "$189");
            assert_eq!(h.review_count, "1832");
            assert_eq!(h.address, "1 Alpine Way");
            assert_eq!(h.url, "https://example.com/gb");
            assert_eq!(h.image_url, UNKNOWN);
        }
        other => panic!("expected hotel, got {:?}", other),
    }
    match &result.records[1] {
        CanonicalRecord::Hotel(h) => {
            assert_eq!(h.id, "hotel-google-1");
            assert_eq!(h.price, UNKNOWN);
        }
        other => panic!("expected hotel, got {:?}", other),
    }
}

#[test]
fn reviews_from_html_when_structured_source_fails() {
    // First source returns garbage, second returns a scraped page. The run
    // must absorb the first and extract from the second.
    let envelopes = vec![
        (
            "google_travel".to_string(),
            ResponseEnvelope::from_body("upstream error: quota exceeded"),
        ),
        (
            "google_travel_html".to_string(),
            ResponseEnvelope::from_body(TRAVEL_HTML),
        ),
    ];
    let result = extract(EntityKind::Review, &envelopes, &[], &review_context()).unwrap();

    assert_eq!(result.total_count, 2);
    match &result.records[0] {
        CanonicalRecord::Review(r) => {
            assert_eq!(r.id, "review-google_travel_html-0");
            assert!(r.text.contains("Ocean view was great"));
            assert_eq!(r.rating, "5");
            assert_eq!(r.date, "2024-03-15");
            assert_eq!(r.author, "Jane D.");
        }
        other => panic!("expected review, got {:?}", other),
    }
    assert!(result.sources.contains("google_travel_html"));
    assert!(!result.sources.contains("google_travel"));
}

#[test]
fn structured_source_beats_html_heuristics_in_priority_order() {
    let structured = ResponseEnvelope::from_body(
        r#"{"reviews": [{"text": "Parsed straight from the JSON payload"}]}"#,
    );
    let envelopes = vec![
        ("google_travel".to_string(), structured),
        (
            "google_travel_html".to_string(),
            ResponseEnvelope::from_body(TRAVEL_HTML),
        ),
    ];
    let result = extract(EntityKind::Review, &envelopes, &[], &review_context()).unwrap();

    assert_eq!(result.records[0].source_tag(), "google_travel");
    assert_eq!(
        result.records[0].text(),
        "Parsed straight from the JSON payload"
    );
}

#[test]
fn duplicate_review_across_sources_keeps_first_source() {
    let envelopes = vec![
        (
            "google_travel".to_string(),
            ResponseEnvelope::from_body(
                r#"{"reviews": [{"text": "Clean rooms, great staff"}]}"#,
            ),
        ),
        (
            "google_travel_html".to_string(),
            ResponseEnvelope::from_body(TRAVEL_HTML),
        ),
    ];
    let result = extract(EntityKind::Review, &envelopes, &[], &review_context()).unwrap();

    let dup: Vec<&CanonicalRecord> = result
        .records
        .iter()
        .filter(|r| r.text() == "Clean rooms, great staff")
        .collect();
    assert_eq!(dup.len(), 1);
    assert_eq!(dup[0].source_tag(), "google_travel");
}

#[test]
fn keyword_filter_and_no_match_sentinel() {
    let envelopes = vec![(
        "google_travel_html".to_string(),
        ResponseEnvelope::from_body(TRAVEL_HTML),
    )];

    let matched = extract(
        EntityKind::Review,
        &envelopes,
        &["Breakfast".to_string()],
        &review_context(),
    )
    .unwrap();
    assert_eq!(matched.total_count, 1);
    assert!(matched.records[0].text().contains("breakfast was excellent"));

    let unmatched = extract(
        EntityKind::Review,
        &envelopes,
        &["submarine".to_string()],
        &review_context(),
    )
    .unwrap();
    assert_eq!(unmatched.total_count, 1);
    assert_eq!(unmatched.records[0].source_tag(), SOURCE_NO_MATCH);
    assert!(unmatched.records[0].text().contains("submarine"));
}

#[test]
fn every_source_empty_yields_one_synthesized_record() {
    let envelopes = vec![
        (
            "google_travel".to_string(),
            ResponseEnvelope::from_body("not json"),
        ),
        (
            "google_travel_html".to_string(),
            ResponseEnvelope::from_body("<html><body></body></html>"),
        ),
    ];
    let result = extract(EntityKind::Review, &envelopes, &[], &review_context()).unwrap();

    assert_eq!(result.total_count, 1);
    assert!(result.is_synthesized());
    match &result.records[0] {
        CanonicalRecord::Review(r) => {
            assert_eq!(r.id, "review-synthesized-0");
            assert_eq!(r.source_tag, SOURCE_SYNTHESIZED);
            assert!(r.text.contains("Grand Budapest"));
            assert!(r.text.contains("Lisbon"));
        }
        other => panic!("expected review, got {:?}", other),
    }
}

#[test]
fn total_count_never_zero_for_valid_requests() {
    let bodies = [
        "",
        "null",
        "{}",
        "[]",
        "{\"unrelated\": {\"deeply\": {\"nested\": 1}}}",
        "<html></html>",
        "\u{0}\u{1}\u{2}",
        "plain text with no structure at all",
    ];
    let pipeline = Pipeline::new();
    for body in bodies {
        let envelopes = vec![("google".to_string(), ResponseEnvelope::from_body(body))];
        let result = pipeline
            .extract(EntityKind::Hotel, &envelopes, &[], &hotel_context())
            .unwrap();
        assert!(result.total_count >= 1, "empty result for body {:?}", body);
        assert_eq!(result.total_count, result.records.len());
    }
}

#[test]
fn classifier_kinds_drive_strategy_selection() {
    assert_eq!(
        ResponseEnvelope::from_body(SERP_HOTELS).kind,
        PayloadKind::StructuredJson
    );
    assert_eq!(
        ResponseEnvelope::from_body(TRAVEL_HTML).kind,
        PayloadKind::HtmlDocument
    );
    assert_eq!(
        ResponseEnvelope::from_body("{broken json").kind,
        PayloadKind::Unknown
    );
}

#[test]
fn result_serializes_with_kind_tags() {
    let envelopes = vec![(
        "google".to_string(),
        ResponseEnvelope::from_body(SERP_HOTELS),
    )];
    let result = extract(EntityKind::Hotel, &envelopes, &[], &hotel_context()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["total_count"], 2);
    assert_eq!(json["records"][0]["kind"], "hotel");
    assert_eq!(json["records"][0]["name"], "Grand Budapest");
    assert_eq!(json["sources"][0], "google");
}
