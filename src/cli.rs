// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// a Rust struct and attributes (the #[...] things). Every flag has a
// default, so `site-mapper` with no arguments maps the example site.
// =============================================================================

use crate::crawl::{CrawlConfig, CrawlResult};
use crate::error::CrawlError;
use crate::output::Format;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// The site mapped when no --url is given.
pub const DEFAULT_URL: &str = "https://gophercises.com";

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "site-mapper",
    version,
    about = "Crawl a website breadth-first and print its sitemap",
    long_about = "site-mapper starts from one URL, follows every link that stays on the same \
                  site (scheme + host) up to a maximum depth, and prints the pages it found \
                  in the order it found them - as plain text, an XML sitemap, or JSON."
)]
pub struct Cli {
    /// Website to map (e.g., https://example.com)
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Maximum crawl depth
    ///
    /// Depth 0 = just the starting page
    /// Depth 1 = starting page + every page it links to
    /// etc.
    #[arg(long, default_value_t = 3)]
    pub max_depth: usize,

    /// How many pages to fetch at the same time
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Retries for transient failures (timeouts, 5xx, 429)
    #[arg(long, default_value_t = 1)]
    pub retries: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Write the output to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// User-Agent header sent with every request
    #[arg(long, default_value = concat!("site-mapper/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,

    /// Log debug output to stderr (RUST_LOG overrides this)
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    // Builds the crawl settings from the flags, leaving the rest at defaults
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.max_depth,
            concurrency: usize::from(self.concurrency),
            fetch_timeout: self.fetch_timeout(),
            retries: self.retries,
            ..CrawlConfig::default()
        }
    }
}

// Process exit code for a crawl attempt
//
// 0 even when some pages failed - those are reported, not fatal.
// 1 when the crawl never got going (bad or unreachable seed, early Ctrl-C).
pub fn exit_code(outcome: &Result<CrawlResult, CrawlError>) -> i32 {
    match outcome {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["site-mapper"]);
        assert_eq!(cli.url, DEFAULT_URL);
        assert_eq!(cli.max_depth, 3);
        assert_eq!(cli.concurrency, 8);
        assert_eq!(cli.format, Format::Text);
        assert!(cli.output.is_none());
        assert!(cli.user_agent.starts_with("site-mapper/"));
    }

    #[test]
    fn test_flags_flow_into_crawl_config() {
        let cli = Cli::parse_from([
            "site-mapper",
            "--url",
            "https://example.com",
            "--max-depth",
            "1",
            "--concurrency",
            "2",
            "--timeout",
            "30",
            "--retries",
            "0",
            "--format",
            "sitemap",
        ]);
        let config = cli.crawl_config();
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.retries, 0);
        assert_eq!(cli.format, Format::Sitemap);
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        assert!(Cli::try_parse_from(["site-mapper", "--concurrency", "0"]).is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["site-mapper", "--timeout", "0"]).is_err());
        let cli = Cli::parse_from(["site-mapper", "--timeout", "1"]);
        assert_eq!(cli.fetch_timeout(), Duration::from_secs(1));
    }
}
