// src/lib.rs
// =============================================================================
// site-mapper as a library: everything main.rs needs, exposed so the crawler
// can also be driven from other code (with your own Fetcher, for example).
// =============================================================================

pub mod cli; // command-line parsing
pub mod crawl; // breadth-first crawler
pub mod error; // fetch and crawl errors
pub mod fetch; // how pages are fetched
pub mod links; // link extraction and origin filtering
pub mod output; // text / sitemap / json rendering
