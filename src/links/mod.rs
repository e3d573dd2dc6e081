// src/links/mod.rs
// =============================================================================
// This module finds the same-site links on a page.
//
// Submodules:
// - origin: the Origin and PageUrl types
// - anchors: pulls raw href values out of HTML (scraper does the parsing)
// - extract: resolves hrefs into absolute URLs and keeps same-origin ones
// =============================================================================

mod anchors;
mod extract;
mod origin;

pub use extract::extract_links;
pub use origin::{Origin, PageUrl};
