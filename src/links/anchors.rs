// src/links/anchors.rs
// =============================================================================
// This module pulls the raw href values out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which recovers from broken markup the same way
//   a browser does (unclosed tags, stray quotes, ...) instead of failing
//
// Nothing here resolves or filters URLs - that is extract.rs's job.
// =============================================================================

use scraper::{Html, Selector};

// Returns every <a href="..."> value in document order, untouched
//
// Parameters:
//   html: the raw page body (may not even be valid UTF-8)
//
// Example:
//   html = "<a href='/docs'>Docs</a><a>no href</a>"
//   result = ["/docs"]
pub fn anchor_hrefs(html: &[u8]) -> Vec<String> {
    // Invalid UTF-8 sequences become U+FFFD rather than failing the page
    let text = String::from_utf8_lossy(html);
    let document = Html::parse_document(&text);

    // "a[href]" means "all <a> tags that have an href attribute"
    // The selector is a constant, so parsing it cannot fail at runtime
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}


// BEGINNER NOTES:
//
// 1. Why String::from_utf8_lossy?
//    - Web pages are bytes, and not every server sends valid UTF-8
//    - from_utf8_lossy never fails: bad bytes become the replacement
//      character, and the links around them still parse
//    - It returns a Cow<str>, so valid input is borrowed without copying
//
// 2. What does filter_map do?
//    - It's map + filter in one step
//    - attr("href") returns Option<&str>; None values are simply dropped
