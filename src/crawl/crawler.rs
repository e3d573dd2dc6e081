// src/crawl/crawler.rs
// =============================================================================
// This module implements the breadth-first site crawl.
//
// How it works:
// 1. Fetch the seed once and take the Origin from where it finally landed
//    (so "http://site.com" redirecting to "https://www.site.com" maps the
//    https://www site)
// 2. Queue the seed's same-origin links at depth 1
// 3. Take a whole depth layer from the frontier and fetch it concurrently
// 4. Go through the layer's results in queue order: record failures,
//    queue the links of pages that are still above max_depth
// 5. Repeat until the frontier is empty
//
// Workers never touch the frontier. Their results stream back to this one
// coordinator loop, which makes every dedup decision alone.
//
// Rust concepts:
// - Arc<dyn Fetcher>: any fetch implementation, real or fake
// - Streams + buffer_unordered: a bounded pool of in-flight fetches
// - tokio::select!: racing fetch results against cancellation
// =============================================================================

use super::config::CrawlConfig;
use super::queue::{Frontier, FrontierEntry};
use super::result::{CrawlResult, DiscoveredPage, PageError};
use crate::error::{CrawlError, FetchError};
use crate::fetch::{FetchedPage, Fetcher};
use crate::links::{extract_links, Origin, PageUrl};
use futures::future;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

type FetchOutcome = Result<FetchedPage, FetchError>;

// Per-fetch rules, copied into every in-flight fetch
#[derive(Debug, Clone, Copy)]
struct FetchPolicy {
    timeout: Duration,
    retries: u32,
    backoff: Duration,
}

pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    config: CrawlConfig,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            config: CrawlConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    fn policy(&self) -> FetchPolicy {
        FetchPolicy {
            timeout: self.config.fetch_timeout,
            retries: self.config.retries,
            backoff: self.config.retry_backoff,
        }
    }

    // Crawls the site behind `seed`
    //
    // Only a seed that cannot be parsed or fetched is an error. Every other
    // failed page is recorded in the result and the crawl carries on.
    // Raising `cancel` stops new fetches and returns what was found so far.
    pub async fn crawl(
        &self,
        seed: &str,
        cancel: CancellationToken,
    ) -> Result<CrawlResult, CrawlError> {
        let max_depth = self.config.max_depth;
        info!(
            seed,
            max_depth,
            concurrency = self.config.concurrency,
            "starting crawl"
        );

        let seed_url = PageUrl::parse(seed).map_err(|e| CrawlError::InvalidSeed {
            url: seed.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(seed_url.as_url().scheme(), "http" | "https") {
            return Err(CrawlError::InvalidSeed {
                url: seed.to_string(),
                reason: "only http and https URLs can be crawled".to_string(),
            });
        }

        let seed_outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CrawlError::Cancelled),
            outcome = fetch_with_policy(self.fetcher.as_ref(), &seed_url, self.policy()) => outcome,
        };
        let seed_page = seed_outcome.map_err(|source| CrawlError::SeedUnreachable {
            url: seed_url.to_string(),
            source,
        })?;

        // The seed is allowed to redirect anywhere; wherever it lands is the site
        let origin = Origin::from_url(&seed_page.final_url)
            .ok_or_else(|| CrawlError::OriginUnavailable(seed_page.final_url.to_string()))?;
        let root = PageUrl::from(seed_page.final_url.clone());
        if root != seed_url {
            info!(from = %seed_url, to = %root, "seed redirected");
        }

        let mut frontier = Frontier::new();
        frontier.mark_visited(seed_url);
        frontier.mark_visited(root.clone());

        let mut result = CrawlResult::new(origin.clone());
        result.pages.push(DiscoveredPage {
            url: root.clone(),
            depth: 0,
        });

        // The seed body is already here, no need to fetch it a second time
        self.expand(&mut frontier, &mut result, &origin, &root, 0, &seed_page);

        while !frontier.is_empty() {
            let layer: Vec<FrontierEntry> = frontier
                .next_layer()
                .into_iter()
                .filter(|entry| {
                    if entry.depth > max_depth {
                        debug!(url = %entry.url, depth = entry.depth, "beyond max depth, skipping");
                        return false;
                    }
                    true
                })
                .collect();

            let Some(depth) = layer.first().map(|entry| entry.depth) else {
                continue;
            };
            info!(depth, pages = layer.len(), "fetching layer");

            let (outcomes, cancelled) = self.fetch_layer(&layer, &cancel).await;

            for (entry, outcome) in layer.iter().zip(outcomes) {
                let page = match outcome {
                    // Never dispatched, or dropped when the grace period ran out
                    None => {
                        debug!(url = %entry.url, "fetch abandoned");
                        result.errors.push(PageError {
                            url: entry.url.clone(),
                            error: FetchError::Abandoned,
                        });
                        continue;
                    }
                    Some(Err(error)) => {
                        warn!(url = %entry.url, %error, "failed to fetch page");
                        result.errors.push(PageError {
                            url: entry.url.clone(),
                            error,
                        });
                        continue;
                    }
                    Some(Ok(page)) => page,
                };

                if !origin.contains(&page.final_url) {
                    let error = FetchError::OffOriginRedirect(page.final_url.to_string());
                    warn!(url = %entry.url, %error, "not following page");
                    result.errors.push(PageError {
                        url: entry.url.clone(),
                        error,
                    });
                    continue;
                }

                // "/docs" landing on "/docs/" makes "/docs/" seen as well
                let landed = PageUrl::from(page.final_url.clone());
                if landed != entry.url {
                    debug!(from = %entry.url, to = %landed, "page redirected");
                    frontier.mark_visited(landed);
                }

                // Once cancelled we keep what finished but discover nothing new
                if !cancelled {
                    self.expand(
                        &mut frontier,
                        &mut result,
                        &origin,
                        &entry.url,
                        entry.depth,
                        &page,
                    );
                }
            }

            if cancelled {
                warn!("crawl cancelled, returning partial results");
                result.cancelled = true;
                break;
            }
        }

        info!(
            pages = result.pages.len(),
            errors = result.errors.len(),
            visited = frontier.visited_count(),
            cancelled = result.cancelled,
            "crawl finished"
        );
        Ok(result)
    }

    // Queues the unseen same-origin links of a fetched page
    //
    // Pages at max_depth are fetched (so broken ones get reported) but
    // their links are not followed.
    fn expand(
        &self,
        frontier: &mut Frontier,
        result: &mut CrawlResult,
        origin: &Origin,
        url: &PageUrl,
        depth: usize,
        page: &FetchedPage,
    ) {
        if depth >= self.config.max_depth {
            return;
        }
        if !page.is_html() {
            debug!(%url, content_type = ?page.content_type, "not HTML, skipping link extraction");
            return;
        }

        let links = extract_links(&page.body, url, origin);
        let found = links.len();
        let mut queued = 0;

        for link in links {
            if frontier.push(link.clone(), depth + 1) {
                result.pages.push(DiscoveredPage {
                    url: link,
                    depth: depth + 1,
                });
                queued += 1;
            }
        }

        debug!(%url, depth, found, queued, "expanded page");
    }

    // Fetches one layer with at most `concurrency` requests in flight
    //
    // Returns one slot per entry (same order as `layer`) and whether the
    // crawl was cancelled. A slot is None when its fetch was never started
    // or was abandoned once the shutdown grace period ran out.
    async fn fetch_layer(
        &self,
        layer: &[FrontierEntry],
        cancel: &CancellationToken,
    ) -> (Vec<Option<FetchOutcome>>, bool) {
        let fetcher = self.fetcher.as_ref();
        let policy = self.policy();
        let dispatch = cancel.clone();

        let mut outcomes: Vec<Option<FetchOutcome>> = layer.iter().map(|_| None).collect();

        // take_while is checked each time the pool wants another entry,
        // so cancellation stops dispatch but lets in-flight fetches finish
        let fetches = stream::iter(layer.iter().enumerate())
            .take_while(move |_| future::ready(!dispatch.is_cancelled()))
            .map(|(idx, entry)| async move {
                (idx, fetch_with_policy(fetcher, &entry.url, policy).await)
            })
            .buffer_unordered(self.config.concurrency.max(1));
        tokio::pin!(fetches);

        let grace = async {
            cancel.cancelled().await;
            tokio::time::sleep(self.config.shutdown_grace).await;
        };
        tokio::pin!(grace);

        loop {
            tokio::select! {
                next = fetches.next() => match next {
                    Some((idx, outcome)) => outcomes[idx] = Some(outcome),
                    None => break,
                },
                _ = &mut grace => {
                    warn!("shutdown grace period over, abandoning in-flight fetches");
                    break;
                }
            }
        }

        (outcomes, cancel.is_cancelled())
    }
}

// Fetches one page under the timeout and retry rules
//
// A fetch that outlives the timeout counts as FetchError::Timeout.
async fn fetch_with_policy(
    fetcher: &dyn Fetcher,
    url: &PageUrl,
    policy: FetchPolicy,
) -> FetchOutcome {
    let mut attempt = 0;
    loop {
        let outcome = match tokio::time::timeout(policy.timeout, fetcher.fetch(url)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(FetchError::Timeout),
        };

        match outcome {
            Ok(page) => return Ok(page),
            Err(error) if attempt < policy.retries && error.is_retryable() => {
                attempt += 1;
                debug!(%url, %error, attempt, "retrying fetch");
                tokio::time::sleep(policy.backoff * attempt).await;
            }
            Err(error) => return Err(error),
        }
    }
}


// BEGINNER NOTES:
//
// 1. Why fetch a whole layer and then process it?
//    - Every page at depth N must be discovered before any page at depth N+1
//    - Fetching a layer concurrently keeps that guarantee and still overlaps
//      the slow network waits
//    - Going through results in queue order (not completion order) means the
//      output is the same no matter which request happened to finish first
//
// 2. What is CancellationToken?
//    - A cheap, cloneable "please stop" flag from tokio-util
//    - main.rs cancels it on Ctrl-C; the crawler checks is_cancelled() before
//      starting each fetch and can also .await cancelled() inside select!
//
// 3. Why Arc<dyn Fetcher> instead of a generic?
//    - The crawler doesn't care how pages are fetched
//    - Tests plug in a fake site, main.rs plugs in the real HTTP client
