// src/crawl/result.rs
// =============================================================================
// What a crawl hands back.
//
// `pages` is in first-discovery order (the order a sequential BFS would find
// them), NOT the order fetches happened to finish in.
// =============================================================================

use crate::error::FetchError;
use crate::links::{Origin, PageUrl};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPage {
    pub url: PageUrl,
    pub depth: usize,
}

// A page we discovered but could not fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageError {
    pub url: PageUrl,
    pub error: FetchError,
}

#[derive(Debug, Clone)]
pub struct CrawlResult {
    pub origin: Origin,
    pub pages: Vec<DiscoveredPage>,
    pub errors: Vec<PageError>,
    /// True when the crawl was stopped before the frontier ran dry.
    pub cancelled: bool,
}

impl CrawlResult {
    pub fn new(origin: Origin) -> Self {
        Self {
            origin,
            pages: Vec::new(),
            errors: Vec::new(),
            cancelled: false,
        }
    }

    /// The discovered URLs, in discovery order.
    pub fn urls(&self) -> impl Iterator<Item = &PageUrl> {
        self.pages.iter().map(|page| &page.url)
    }
}
