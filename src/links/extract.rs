// src/links/extract.rs
// =============================================================================
// This module turns raw hrefs into same-origin page URLs.
//
// Rules, in order:
// 1. "//host/path"      -> protocol-relative, borrow the origin's scheme
// 2. "/path"            -> root-relative, prefix with the origin
// 3. "http(s)://..."    -> already absolute
// 4. anything else      -> discarded ("about.html", "mailto:", "#top", "")
// 5. strip the fragment, then drop anything not on the origin
//
// Rule 4 is intentionally conservative: plain relative paths are NOT
// resolved against the current page, so some real links are missed.
// =============================================================================

use super::anchors::anchor_hrefs;
use super::origin::{Origin, PageUrl};
use std::collections::HashSet;
use thiserror::Error;
use tracing::trace;

// Why a single href did not become a page URL
//
// None of these are fatal - a bad anchor only costs us that anchor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkRejection {
    #[error("unsupported link form: {0:?}")]
    Unsupported(String),

    #[error("malformed link {href:?}: {source}")]
    Malformed {
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error("link leaves the site: {0}")]
    OffOrigin(String),
}

// A raw href and the page it was found on
#[derive(Debug, Clone)]
pub struct Link<'a> {
    pub href: &'a str,
    pub found_on: &'a PageUrl,
}

impl Link<'_> {
    /// Resolves this link against `origin`, applying every filtering rule.
    pub fn resolve(&self, origin: &Origin) -> Result<PageUrl, LinkRejection> {
        let href = self.href.trim();
        let lower = href.to_ascii_lowercase();

        let absolute = if href.starts_with("//") {
            format!("{}:{}", origin.scheme(), href)
        } else if href.starts_with('/') {
            format!("{}{}", origin, href)
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            href.to_string()
        } else {
            return Err(LinkRejection::Unsupported(href.to_string()));
        };

        let page = PageUrl::parse(&absolute).map_err(|source| LinkRejection::Malformed {
            href: href.to_string(),
            source,
        })?;

        if !origin.contains(page.as_url()) {
            return Err(LinkRejection::OffOrigin(page.to_string()));
        }

        Ok(page)
    }
}

// Extracts the distinct same-origin pages referenced by an HTML document
//
// Parameters:
//   html: raw page body
//   found_on: the page the body came from (only used for logging)
//   origin: the crawl's fixed origin
//
// Returns: unique PageUrls; document order is kept only so a crawl
// discovers pages deterministically
pub fn extract_links(html: &[u8], found_on: &PageUrl, origin: &Origin) -> Vec<PageUrl> {
    let mut seen = HashSet::new();
    let mut pages = Vec::new();

    for href in anchor_hrefs(html) {
        let link = Link {
            href: &href,
            found_on,
        };
        match link.resolve(origin) {
            Ok(page) => {
                if seen.insert(page.clone()) {
                    pages.push(page);
                }
            }
            Err(rejection) => {
                trace!(page = %link.found_on, %rejection, "discarding link");
            }
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn origin(url: &str) -> Origin {
        Origin::from_url(&Url::parse(url).unwrap()).unwrap()
    }

    fn extract(html: &str, base: &str) -> Vec<String> {
        let page = PageUrl::parse(base).unwrap();
        extract_links(html.as_bytes(), &page, &origin(base))
            .into_iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn test_same_target_forms_collapse_and_foreign_links_drop() {
        let html = r##"
            <a href="/about">About</a>
            <a href="https://example.com/about">About again</a>
            <a href="https://other.com/x">Elsewhere</a>
            <a href="#top">Top</a>
        "##;
        assert_eq!(extract(html, "https://example.com"), vec!["https://example.com/about"]);
    }

    #[test]
    fn test_plain_relative_paths_are_discarded() {
        let html = r#"<a href="about.html">About</a><a href="../up">Up</a>"#;
        assert!(extract(html, "https://example.com/docs/").is_empty());
    }

    #[test]
    fn test_special_schemes_are_discarded() {
        let html = r#"
            <a href="mailto:me@example.com">Mail</a>
            <a href="javascript:void(0)">JS</a>
            <a href="tel:+123">Call</a>
            <a href="">Empty</a>
        "#;
        assert!(extract(html, "https://example.com").is_empty());
    }

    #[test]
    fn test_fragment_is_stripped_before_dedup() {
        let html = r##"<a href="/guide#intro">1</a><a href="/guide#setup">2</a><a href="/guide">3</a>"##;
        assert_eq!(extract(html, "https://example.com"), vec!["https://example.com/guide"]);
    }

    #[test]
    fn test_query_is_preserved() {
        let html = r#"<a href="/search?q=rust">Search</a><a href="/search?q=go">Search</a>"#;
        assert_eq!(
            extract(html, "https://example.com"),
            vec!["https://example.com/search?q=rust", "https://example.com/search?q=go"]
        );
    }

    #[test]
    fn test_scheme_mismatch_is_off_origin() {
        let html = r#"<a href="http://example.com/insecure">Old</a>"#;
        assert!(extract(html, "https://example.com").is_empty());
    }

    #[test]
    fn test_protocol_relative_uses_origin_scheme() {
        let html = r#"<a href="//example.com/cdn">Same</a><a href="//cdn.other.com/x">Other</a>"#;
        assert_eq!(extract(html, "https://example.com"), vec!["https://example.com/cdn"]);
    }

    #[test]
    fn test_whitespace_and_case_in_scheme() {
        let html = r#"<a href="  HTTPS://EXAMPLE.com/Caps  ">Caps</a>"#;
        assert_eq!(extract(html, "https://example.com"), vec!["https://example.com/Caps"]);
    }

    #[test]
    fn test_malformed_href_is_rejected_not_fatal() {
        let page = PageUrl::parse("https://example.com").unwrap();
        let link = Link {
            href: "https://exa mple.com/bad",
            found_on: &page,
        };
        assert!(matches!(
            link.resolve(&origin("https://example.com")),
            Err(LinkRejection::Malformed { .. })
        ));

        let html = r#"<a href="http://[::1">broken</a><a href="/fine">ok</a>"#;
        assert_eq!(extract(html, "https://example.com"), vec!["https://example.com/fine"]);
    }

    #[test]
    fn test_never_returns_foreign_origin() {
        let html = r#"
            <a href="https://example.com.evil.com/">1</a>
            <a href="https://evil.com/https://example.com/">2</a>
            <a href="https://example.com:8443/">3</a>
            <a href="//evil.com/">4</a>
            <a href="/ok">5</a>
            <a href="HTTP://example.com/">6</a>
        "#;
        let base = origin("https://example.com");
        let page = PageUrl::parse("https://example.com/").unwrap();
        for found in extract_links(html.as_bytes(), &page, &base) {
            assert!(base.contains(found.as_url()), "{} escaped the origin", found);
        }
    }
}
