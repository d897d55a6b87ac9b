//! Core rate limiter implementation.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::entry::RateLimitEntry;
use super::sweeper::{self, Sweeper};
use crate::config::{FloodgateConfig, SweeperConfig};

/// Configuration for a rate limit, supplied by the caller on every check.
///
/// The limiter does not remember which config produced which entry, so each
/// key should be checked with a consistent config. Degenerate values are
/// defined behavior rather than errors: `max_requests == 0` denies every
/// request, and `window_ms <= 0` remembers nothing, admitting every
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests admitted per window
    pub max_requests: u32,
    /// Window length in milliseconds
    pub window_ms: i64,
}

/// The outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Admits left immediately after this call (0 when denied)
    pub remaining: u32,
    /// On denial, milliseconds until the oldest in-window request expires
    /// and frees a slot; on admission, the full window length
    pub reset_ms: i64,
}

impl RateLimitResult {
    /// The reset delay in whole seconds, rounded up.
    ///
    /// Suitable for a `Retry-After` header on a denied request.
    pub fn retry_after_secs(&self) -> i64 {
        (self.reset_ms.max(0) + 999) / 1000
    }
}

/// The core rate limiter that manages per-key request windows.
///
/// This struct is thread-safe and can be shared across multiple tasks.
/// Checks on distinct keys proceed independently; checks on the same key
/// serialize through the store's per-shard locking, so an admitted count
/// never exceeds the configured maximum under concurrency.
pub struct RateLimiter {
    /// Request windows indexed by caller-defined key
    entries: Arc<DashMap<String, RateLimitEntry>>,
    /// Sweeper tuning applied when the background task is started
    sweeper_config: SweeperConfig,
    /// Handle to the running background sweeper, if any
    sweeper: Mutex<Option<Sweeper>>,
}

impl RateLimiter {
    /// Create a new rate limiter with default sweeper settings.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            sweeper_config: SweeperConfig::default(),
            sweeper: Mutex::new(None),
        }
    }

    /// Create a new rate limiter from an embedding-level configuration.
    pub fn with_config(config: &FloodgateConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            sweeper_config: config.sweeper.clone(),
            sweeper: Mutex::new(None),
        }
    }

    /// Check the rate limit for a given key.
    ///
    /// Prunes timestamps that have slid out of the window, then either
    /// admits the request (recording its timestamp) or denies it. Denied
    /// requests do not consume quota. The check is pure in-memory
    /// computation and always returns a result.
    pub fn check(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        self.check_at(key, config, chrono::Utc::now().timestamp_millis())
    }

    /// Check the rate limit against an explicit clock reading.
    pub(crate) fn check_at(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> RateLimitResult {
        trace!(key = %key, "Checking rate limit");

        // The entry guard holds the shard lock for the whole
        // read-prune-append sequence, making same-key checks linearizable.
        let mut entry = self.entries.entry(key.to_string()).or_insert_with(|| {
            debug!(key = %key, "Creating rate limit entry");
            RateLimitEntry::new()
        });

        entry.prune(now_ms, config.window_ms);

        if entry.len() >= config.max_requests as usize {
            // Denied attempts are not recorded: a denied request must not
            // push the reset further out.
            let reset_ms = match entry.oldest() {
                Some(oldest) => oldest + config.window_ms - now_ms,
                // Empty on denial only happens when max_requests is zero
                None => config.window_ms,
            };

            debug!(
                key = %key,
                limit = config.max_requests,
                reset_ms = reset_ms,
                "Rate limit exceeded"
            );

            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_ms,
            };
        }

        entry.record(now_ms);

        RateLimitResult {
            allowed: true,
            remaining: config.max_requests - entry.len() as u32,
            reset_ms: config.window_ms,
        }
    }

    /// Start the background sweeper on the current tokio runtime.
    ///
    /// Replaces any previously started sweeper. The task runs until
    /// [`shutdown`](Self::shutdown) is called or the limiter is dropped.
    pub fn start_sweeper(&self) {
        let mut slot = self.sweeper.lock();
        if let Some(old) = slot.take() {
            old.abort();
        }
        *slot = Some(Sweeper::spawn(
            Arc::clone(&self.entries),
            self.sweeper_config.clone(),
        ));
    }

    /// Stop the background sweeper and wait for it to retire.
    ///
    /// A no-op when no sweeper is running.
    pub async fn shutdown(&self) {
        let sweeper = self.sweeper.lock().take();
        if let Some(sweeper) = sweeper {
            sweeper.shutdown().await;
        }
    }

    /// Run one eviction pass immediately, outside the sweeper's schedule.
    ///
    /// Returns the number of keys evicted.
    pub fn purge_stale(&self) -> usize {
        sweeper::sweep(
            &self.entries,
            self.sweeper_config.staleness_threshold_ms,
            chrono::Utc::now().timestamp_millis(),
        )
    }

    /// Get the number of keys currently tracked.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Drop all tracked keys.
    ///
    /// This is primarily useful for testing.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        if let Some(sweeper) = self.sweeper.get_mut().take() {
            sweeper.abort();
        }
    }
}
