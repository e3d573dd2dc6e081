// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) on stderr
// 3. Crawl the site, cancelling cleanly on Ctrl-C
// 4. Render the discovered pages and print per-page errors
// 5. Exit with proper code (0 = crawled, 1 = seed unreachable, 2 = error)
// =============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use site_mapper::cli::{exit_code, Cli};
use site_mapper::crawl::{CrawlResult, Crawler};
use site_mapper::error::CrawlError;
use site_mapper::fetch::{Fetcher, HttpFetcher};
use site_mapper::output;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Run our application logic and capture the exit code
    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(code);
}

// Logs go to stderr so stdout only ever carries the sitemap itself
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl finished (individual pages may still have failed)
//   Ok(1) = the seed URL could not be fetched at all
//   Err = unexpected error (writing output, building the HTTP client)
async fn run(cli: Cli) -> Result<i32> {
    eprintln!("🔍 Mapping website: {}", cli.url);
    eprintln!("📊 Max crawl depth: {}", cli.max_depth);

    let fetcher: Arc<dyn Fetcher> = Arc::new(
        HttpFetcher::new(cli.fetch_timeout(), &cli.user_agent)
            .context("failed to build HTTP client")?,
    );
    let crawler = Crawler::new(fetcher).with_config(cli.crawl_config());

    // Ctrl-C stops new fetches; whatever was found so far is still printed
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n⏹️  Interrupted, finishing in-flight requests...");
            on_interrupt.cancel();
        }
    });

    let outcome = crawler.crawl(&cli.url, cancel).await;
    let code = exit_code(&outcome);

    let result = match outcome {
        Ok(result) => result,
        Err(CrawlError::Cancelled) => {
            eprintln!("⏹️  Cancelled before the first page was fetched");
            return Ok(code);
        }
        // Without a reachable seed there is no site to map
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(code);
        }
    };

    let rendered = output::render(&result, cli.format)?;
    match &cli.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }

    print_summary(&result);
    Ok(code)
}

// Prints the end-of-crawl summary and any failed pages to stderr
fn print_summary(result: &CrawlResult) {
    eprintln!();
    eprintln!("📊 Summary for {}:", result.origin.host());
    eprintln!("   📄 Pages found: {}", result.pages.len());
    eprintln!("   ❌ Failed: {}", result.errors.len());
    if result.cancelled {
        eprintln!("   ⏹️  Crawl was cancelled, results are partial");
    }

    for failure in &result.errors {
        eprintln!("   {} - {}", failure.url, failure.error);
    }
}
