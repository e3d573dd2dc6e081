// src/links/origin.rs
// =============================================================================
// This module defines the two URL types the whole crawler speaks in.
//
// - Origin: scheme + host (+ port) that identifies "the same website"
// - PageUrl: a normalized absolute URL with the fragment removed
//
// The `url` crate does most of the normalization for us: parsing lowercases
// the scheme and host, drops default ports (":443" on https) and turns an
// empty path into "/". We only add fragment stripping on top.
// =============================================================================

use serde::Serialize;
use std::fmt;
use url::Url;

// A normalized absolute page URL
//
// Two PageUrls are the same page if their string forms are equal,
// so deriving Eq/Hash on the inner Url is exactly what we want.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageUrl(Url);

impl PageUrl {
    /// Parses and normalizes an absolute URL string.
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(Self::from)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl From<Url> for PageUrl {
    fn from(mut url: Url) -> Self {
        // "/about#team" and "/about" are the same page
        url.set_fragment(None);
        Self(url)
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

// The scheme + host pair a crawl is restricted to
//
// The port is kept too (None when it is the scheme's default), because
// "http://localhost:8080" and "http://localhost:9090" are different sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    // Derives the origin from a URL, usually the seed's final URL
    //
    // Returns None for URLs without a host (mailto:, data:, file: ...)
    pub fn from_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?;
        Some(Self {
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            port: url.port(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// True when `url` lives on this origin.
    pub fn contains(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url.host_str() == Some(self.host.as_str())
            && url.port() == self.port
    }
}

impl fmt::Display for Origin {
    // Renders as "scheme://host[:port]" with no trailing slash, so a
    // root-relative href can be appended directly
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}
