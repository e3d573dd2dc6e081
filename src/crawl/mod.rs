// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-origin restriction (never leaves the site the seed resolved to)
// - Configurable depth limit and per-layer concurrency
// - Per-fetch timeouts, retries for transient failures, and cancellation
//
// Submodules:
// - config: CrawlConfig and its defaults
// - queue: frontier + visited set
// - crawler: the coordinator loop
// - result: what a crawl returns
// =============================================================================

mod config;
mod crawler;
mod queue;
mod result;

pub use config::CrawlConfig;
pub use crawler::Crawler;
pub use result::{CrawlResult, DiscoveredPage, PageError};
