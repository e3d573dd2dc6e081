// src/crawl/queue.rs
// =============================================================================
// This module holds the crawl's bookkeeping: the frontier and visited set.
//
// How it is used:
// 1. The seed is marked visited
// 2. Every newly discovered page goes through push(), which refuses
//    anything already visited - so nothing is ever queued twice
// 3. The crawler takes one whole depth layer at a time with next_layer()
//
// Only the crawl coordinator touches this struct, so it needs no locks.
//
// Rust concepts:
// - HashSet: To track visited URLs (O(1) lookup)
// - VecDeque: Double-ended queue for breadth-first crawling
// =============================================================================

use crate::links::PageUrl;
use std::collections::{HashSet, VecDeque};

// A page waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: PageUrl,
    pub depth: usize, // How many link hops from the seed
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<PageUrl>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a page as seen without queueing it. Returns false if it already was.
    pub fn mark_visited(&mut self, url: PageUrl) -> bool {
        self.visited.insert(url)
    }

    // Queues a page unless it has been seen before
    //
    // Returns true when the page was new. The visited set only ever grows,
    // so a page that was fetched, failed, or is still queued stays rejected.
    pub fn push(&mut self, url: PageUrl, depth: usize) -> bool {
        if !self.visited.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(FrontierEntry { url, depth });
        true
    }

    // Removes and returns every entry at the front depth
    //
    // Entries are pushed in non-decreasing depth order (children are always
    // one deeper than the layer that found them), so the front depth's
    // entries are exactly one contiguous run at the head of the queue.
    pub fn next_layer(&mut self) -> Vec<FrontierEntry> {
        let depth = match self.queue.front() {
            Some(entry) => entry.depth,
            None => return Vec::new(),
        };

        let mut layer = Vec::new();
        while self.queue.front().is_some_and(|entry| entry.depth == depth) {
            if let Some(entry) = self.queue.pop_front() {
                layer.push(entry);
            }
        }
        layer
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
