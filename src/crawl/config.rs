// src/crawl/config.rs
// Tuning knobs for a crawl. Built from the command line in main.rs.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// How many link hops from the seed to follow (0 = just the seed).
    pub max_depth: usize,
    /// Fetches allowed in flight within one depth layer.
    pub concurrency: usize,
    /// Upper bound on a single fetch attempt.
    pub fetch_timeout: Duration,
    /// Extra attempts for transient failures (timeouts, 5xx, 429).
    pub retries: u32,
    /// Delay before retry N is `retry_backoff * N`.
    pub retry_backoff: Duration,
    /// How long in-flight fetches may finish after cancellation.
    pub shutdown_grace: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            concurrency: 8,
            fetch_timeout: Duration::from_secs(10),
            retries: 1,
            retry_backoff: Duration::from_millis(250),
            shutdown_grace: Duration::from_secs(5),
        }
    }
}
