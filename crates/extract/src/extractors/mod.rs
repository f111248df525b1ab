// ABOUTME: Field extraction submodules shared by the strategy chains.
// ABOUTME: Pattern-rule extractors over text fragments and selector helpers over parsed HTML.

//! Field extractors.
//!
//! Submodules:
//! - `fields`: per-attribute ordered lists of named regex pattern rules
//!   (rating, price, date, author, address, review count) applied to
//!   text/markup fragments.
//! - `html`: selector-fallback helpers over `scraper::Html` documents and
//!   elements; first selector yielding a non-empty value wins.

pub mod fields;
pub mod html;
