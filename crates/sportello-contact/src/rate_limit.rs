//! Per-key rolling-window rate limiting.
//!
//! The quota only needs to be approximately right: counters are TTL-based
//! and reads are eventually consistent, the same contract the production
//! key-value store offered.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Append-only TTL counter, the shape a key-value store with expiring keys
/// exposes.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increments the counter for `key`, creating it with the given TTL if
    /// absent, and returns the new count.
    async fn incr(&self, key: &str, ttl: Duration) -> u64;
}

/// In-memory counter store with lazy expiry.
#[derive(Default)]
pub struct InMemoryCounterStore {
    counters: Mutex<HashMap<String, (u64, Instant)>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn incr(&self, key: &str, ttl: Duration) -> u64 {
        let mut counters = self.counters.lock().await;
        let now = Instant::now();

        // Expired entries restart the window.
        let entry = counters
            .entry(key.to_string())
            .and_modify(|(count, expires)| {
                if *expires <= now {
                    *count = 0;
                    *expires = now + ttl;
                }
            })
            .or_insert((0, now + ttl));

        entry.0 += 1;
        entry.0
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    /// Quota exhausted for this window.
    Limited,
}

/// Fixed quota per rolling window, keyed by caller identity (IP address).
pub struct RateLimiter<S: CounterStore> {
    store: S,
    quota: u64,
    window: Duration,
}

impl<S: CounterStore> RateLimiter<S> {
    /// Default production quota: 95 submissions per 24 hours per IP.
    pub fn new(store: S) -> Self {
        Self::with_quota(store, 95, Duration::from_secs(86_400))
    }

    pub fn with_quota(store: S, quota: u64, window: Duration) -> Self {
        Self {
            store,
            quota,
            window,
        }
    }

    /// Counts one request for `key` and decides whether it is allowed.
    pub async fn check(&self, key: &str) -> RateLimitDecision {
        let count = self.store.incr(key, self.window).await;
        if count > self.quota {
            tracing::warn!(key, count, quota = self.quota, "rate limit exceeded");
            RateLimitDecision::Limited
        } else {
            RateLimitDecision::Allowed
        }
    }
}
