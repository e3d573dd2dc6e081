// src/error.rs
// =============================================================================
// Error types shared by the fetcher and the crawler.
//
// Two levels:
// - FetchError: one page could not be fetched. Recorded and the crawl goes on.
// - CrawlError: the crawl itself could not happen (bad or dead seed).
//
// Link-level problems live next to the extractor (links::extract) because
// they never leave it.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("redirected off the site to {0}")]
    OffOriginRedirect(String),

    // Never finished because the crawl was cancelled first
    #[error("abandoned: crawl was cancelled")]
    Abandoned,
}

impl FetchError {
    // Whether trying the same request again might succeed
    //
    // Timeouts, dropped connections, 5xx and 429 are transient;
    // a 404 or a redirect loop will not fix itself.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Connect(_) => true,
            FetchError::Status(code) => *code >= 500 || *code == 429,
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("seed URL {url} is unreachable: {source}")]
    SeedUnreachable {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("seed resolved to {0}, which has no host to crawl")]
    OriginUnavailable(String),

    #[error("crawl cancelled before the seed was fetched")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(FetchError::Timeout.is_retryable());
        assert!(FetchError::Connect("reset".into()).is_retryable());
        assert!(FetchError::Status(503).is_retryable());
        assert!(FetchError::Status(429).is_retryable());
    }

    #[test]
    fn test_permanent_errors() {
        assert!(!FetchError::Status(404).is_retryable());
        assert!(!FetchError::TooManyRedirects.is_retryable());
        assert!(!FetchError::OffOriginRedirect("https://x.org/".into()).is_retryable());
        assert!(!FetchError::Abandoned.is_retryable());
    }

    #[test]
    fn test_seed_unreachable_message() {
        let err = CrawlError::SeedUnreachable {
            url: "https://example.com".into(),
            source: FetchError::Status(500),
        };
        assert_eq!(err.to_string(), "seed URL https://example.com is unreachable: HTTP 500");
    }
}
