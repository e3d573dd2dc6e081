// src/fetch/mod.rs
// =============================================================================
// This module defines how the crawler gets pages.
//
// The crawler never talks to reqwest directly. It is handed something that
// implements `Fetcher`, so tests can swap in a fake that maps URLs to
// canned HTML and errors without any network.
//
// Submodules:
// - http: the real implementation on top of reqwest
// =============================================================================

mod http;

pub use http::HttpFetcher;

use crate::error::FetchError;
use crate::links::PageUrl;
use async_trait::async_trait;
use url::Url;

// What a successful fetch hands back
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where we actually ended up after following redirects.
    pub final_url: Url,
    /// The Content-Type header, if the server sent one.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchedPage {
    pub fn is_html(&self) -> bool {
        is_html_content_type(self.content_type.as_deref())
    }
}

// Pages without a Content-Type are given the benefit of the doubt
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("html"))
        .unwrap_or(true)
}

// Anything that can turn a URL into a page body
//
// #[async_trait] lets us store it as Arc<dyn Fetcher>
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &PageUrl) -> Result<FetchedPage, FetchError>;
}
