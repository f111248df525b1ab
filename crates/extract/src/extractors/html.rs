// ABOUTME: Selector-fallback helpers over parsed HTML documents and elements.
// ABOUTME: Selectors are tried in order; the first non-empty text or attribute wins.

//! Selector-based extraction helpers.
//!
//! Key behaviors:
//! - Selectors are tried in order; first selector yielding a non-empty value wins.
//! - Text extraction joins inner text with spaces and collapses whitespace.
//! - Invalid selectors are skipped, never raised.

use scraper::{ElementRef, Html, Selector};

/// Collapse runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized inner text of an element.
pub fn element_text(el: ElementRef) -> String {
    normalize_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

/// Selects candidate blocks using the first selector that matches anything.
///
/// Used by markup-anchor strategies: anchors are tried in priority order, and
/// all blocks from the winning anchor are returned in document order.
pub fn select_blocks<'a>(doc: &'a Html, selectors: &[&str]) -> Vec<ElementRef<'a>> {
    for &sel_str in selectors {
        let sel = match Selector::parse(sel_str) {
            Ok(s) => s,
            Err(_) => continue,
        };
        let blocks: Vec<ElementRef<'a>> = doc.select(&sel).collect();
        if !blocks.is_empty() {
            return blocks;
        }
    }
    Vec::new()
}

/// First non-empty descendant text within an element, trying selectors in order.
pub fn first_text_in(el: ElementRef, selectors: &[&str]) -> Option<String> {
    for &sel_str in selectors {
        let sel = match Selector::parse(sel_str) {
            Ok(s) => s,
            Err(_) => continue,
        };
        for child in el.select(&sel) {
            let text = element_text(child);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// First non-empty descendant attribute value within an element.
pub fn first_attr_in(el: ElementRef, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    for child in el.select(&sel) {
        if let Some(value) = child.value().attr(attr) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}
