// src/output/mod.rs
// =============================================================================
// This module turns a CrawlResult into text for the user.
//
// Formats:
// - text: one URL per line, discovery order (easy to pipe into other tools)
// - sitemap: an XML sitemap document (see sitemap.rs)
// - json: the whole result, including per-page errors
// =============================================================================

mod sitemap;

pub use sitemap::{parse_sitemap, write_sitemap};

use crate::crawl::CrawlResult;
use crate::links::PageUrl;
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One URL per line
    Text,
    /// XML sitemap (sitemaps.org)
    Sitemap,
    /// JSON report with depths and errors
    Json,
}

// The JSON view of a crawl
//
// FetchError is flattened to its message so the report stays readable
#[derive(Debug, Serialize)]
struct Report<'a> {
    origin: String,
    pages: Vec<ReportPage<'a>>,
    errors: Vec<ReportError<'a>>,
    cancelled: bool,
}

#[derive(Debug, Serialize)]
struct ReportPage<'a> {
    url: &'a PageUrl,
    depth: usize,
}

#[derive(Debug, Serialize)]
struct ReportError<'a> {
    url: &'a PageUrl,
    message: String,
}

fn report(result: &CrawlResult) -> Report<'_> {
    Report {
        origin: result.origin.to_string(),
        pages: result
            .pages
            .iter()
            .map(|page| ReportPage {
                url: &page.url,
                depth: page.depth,
            })
            .collect(),
        errors: result
            .errors
            .iter()
            .map(|e| ReportError {
                url: &e.url,
                message: e.error.to_string(),
            })
            .collect(),
        cancelled: result.cancelled,
    }
}

// Renders a crawl result in the requested format
pub fn render(result: &CrawlResult, format: Format) -> Result<String> {
    match format {
        Format::Text => {
            let mut out = String::new();
            for url in result.urls() {
                out.push_str(url.as_str());
                out.push('\n');
            }
            Ok(out)
        }
        Format::Sitemap => write_sitemap(result.urls().map(PageUrl::as_str)),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&report(result))?;
            json.push('\n');
            Ok(json)
        }
    }
}
