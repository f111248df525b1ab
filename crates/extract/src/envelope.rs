// ABOUTME: Response envelope and payload classifier for raw scraping-proxy responses.
// ABOUTME: Tags a raw body as structured-json, html-document, or unknown without ever raising.

//! Payload classification.
//!
//! The upstream scraping proxy returns bodies of unpredictable shape: a JSON
//! document for SERP-style zones, a full HTML page for unlocker zones, or
//! arbitrary text when something upstream went sideways. The classifier is a
//! pure, total function over the body:
//!
//! - Trimmed body starting with `{` or `[` that parses as JSON ⇒ `StructuredJson`.
//! - Otherwise, a case-insensitive `<html` or `<!doctype html` marker ⇒ `HtmlDocument`.
//! - Otherwise ⇒ `Unknown`.
//!
//! A failed JSON parse degrades to the HTML check rather than propagating.
//! The resulting `kind` is derived once here and never overridden downstream.

use serde::{Deserialize, Serialize};

/// The classified shape of a proxy response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadKind {
    StructuredJson,
    HtmlDocument,
    Unknown,
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PayloadKind::StructuredJson => "structured-json",
            PayloadKind::HtmlDocument => "html-document",
            PayloadKind::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// The raw response wrapper handed to the strategy chains.
///
/// Exactly one of `structured` / `raw_body` is meaningfully populated,
/// depending on `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub kind: PayloadKind,
    pub structured: Option<serde_json::Value>,
    pub raw_body: Option<String>,
}

impl ResponseEnvelope {
    /// Classify a raw body into an envelope.
    pub fn from_body(body: &str) -> Self {
        let trimmed = body.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
                return Self {
                    kind: PayloadKind::StructuredJson,
                    structured: Some(value),
                    raw_body: None,
                };
            }
            // Not valid JSON after all; fall through to the marker checks.
        }

        let lower = body.to_lowercase();
        if lower.contains("<html") || lower.contains("<!doctype html") {
            return Self {
                kind: PayloadKind::HtmlDocument,
                structured: None,
                raw_body: Some(body.to_string()),
            };
        }

        Self {
            kind: PayloadKind::Unknown,
            structured: None,
            raw_body: Some(body.to_string()),
        }
    }

    /// Build an envelope directly from already-parsed structured fields.
    pub fn from_json(value: serde_json::Value) -> Self {
        Self {
            kind: PayloadKind::StructuredJson,
            structured: Some(value),
            raw_body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_object_classifies_as_structured() {
        let env = ResponseEnvelope::from_body(r#"{"a":1}"#);
        assert_eq!(env.kind, PayloadKind::StructuredJson);
        assert!(env.structured.is_some());
        assert!(env.raw_body.is_none());
        assert_eq!(env.structured.unwrap()["a"], 1);
    }

    #[test]
    fn test_json_array_classifies_as_structured() {
        let env = ResponseEnvelope::from_body("  [1, 2, 3]");
        assert_eq!(env.kind, PayloadKind::StructuredJson);
    }

    #[test]
    fn test_html_classifies_as_html_document() {
        let env = ResponseEnvelope::from_body("<html><body>hi</body></html>");
        assert_eq!(env.kind, PayloadKind::HtmlDocument);
        assert!(env.raw_body.is_some());
        assert!(env.structured.is_none());
    }

    #[test]
    fn test_doctype_marker_is_case_insensitive() {
        let env = ResponseEnvelope::from_body("<!DOCTYPE HTML><html></html>");
        assert_eq!(env.kind, PayloadKind::HtmlDocument);
    }

    #[test]
    fn test_plain_text_classifies_as_unknown() {
        let env = ResponseEnvelope::from_body("plain text");
        assert_eq!(env.kind, PayloadKind::Unknown);
        assert_eq!(env.raw_body.as_deref(), Some("plain text"));
    }

    #[test]
    fn test_malformed_json_falls_through_to_html_check() {
        // Starts with '{' but is not JSON; contains an html marker.
        let env = ResponseEnvelope::from_body("{oops <html> fragment");
        assert_eq!(env.kind, PayloadKind::HtmlDocument);
    }

    #[test]
    fn test_malformed_json_without_markup_is_unknown() {
        let env = ResponseEnvelope::from_body("{not json at all");
        assert_eq!(env.kind, PayloadKind::Unknown);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PayloadKind::StructuredJson.to_string(), "structured-json");
        assert_eq!(PayloadKind::HtmlDocument.to_string(), "html-document");
        assert_eq!(PayloadKind::Unknown.to_string(), "unknown");
    }
}
