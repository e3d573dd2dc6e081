// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP(S) with reqwest.
//
// Key functionality:
// - One shared Client (connection pooling across the whole crawl)
// - Follows redirects and reports the URL we finally landed on
// - Treats any non-2xx status as a failure for that page
// - Only downloads bodies that can contain links (HTML)
// - Sorts reqwest's errors into the few kinds the crawler cares about
// =============================================================================

use super::{is_html_content_type, FetchedPage, Fetcher};
use crate::error::FetchError;
use crate::links::PageUrl;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use tracing::debug;

/// How many redirects a single fetch may follow.
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Creates a fetcher with a per-request timeout and user agent
    //
    // The connect timeout is half the overall timeout so a dead host fails
    // fast and leaves the rest of the budget for slow responses.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout / 2)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &PageUrl) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // response.url() is the last hop of the redirect chain
        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // A PDF or zip on the site is still a page, but its bytes are useless to us
        if !is_html_content_type(content_type.as_deref()) {
            debug!(%url, %final_url, content_type = ?content_type, "not HTML, body skipped");
            return Ok(FetchedPage {
                final_url,
                content_type,
                body: Vec::new(),
            });
        }

        let body = response.bytes().await.map_err(categorize_error)?.to_vec();
        debug!(%url, %final_url, bytes = body.len(), "fetched page");

        Ok(FetchedPage {
            final_url,
            content_type,
            body,
        })
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure / refused connection
// - Too many redirects
// - Body decoding problems, TLS, etc.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Http(error.to_string())
    }
}
