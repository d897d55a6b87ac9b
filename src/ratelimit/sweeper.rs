//! Background eviction of idle keys.
//!
//! The sweeper bounds memory under high key cardinality. It is a coarse
//! reclamation pass over the whole store, not part of the admission
//! decision: per-check pruning already keeps each entry's in-window state
//! correct, so the sweeper only has to clear out keys that have gone quiet.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::entry::RateLimitEntry;
use crate::config::SweeperConfig;

/// Handle to the periodic eviction task.
///
/// The task runs until aborted; the owning limiter aborts it on shutdown
/// and on drop.
pub(crate) struct Sweeper {
    task: JoinHandle<()>,
}

impl Sweeper {
    /// Spawn the eviction task on the current tokio runtime.
    pub(crate) fn spawn(
        entries: Arc<DashMap<String, RateLimitEntry>>,
        config: SweeperConfig,
    ) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(Duration::from_secs(config.interval_secs.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // An interval's first tick completes immediately; skip it so a
            // freshly started limiter does not sweep before anything can be
            // stale.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let now_ms = chrono::Utc::now().timestamp_millis();
                let evicted = sweep(&entries, config.staleness_threshold_ms, now_ms);
                if evicted > 0 {
                    debug!(evicted, "Evicted idle rate limit keys");
                }
            }
        });

        Self { task }
    }

    /// Cancel the task without waiting for it to retire.
    pub(crate) fn abort(&self) {
        self.task.abort();
    }

    /// Cancel the task and wait until it has fully retired.
    pub(crate) async fn shutdown(self) {
        self.task.abort();
        let _ = self.task.await;
    }
}

/// Run one eviction pass.
///
/// Prunes timestamps older than the staleness threshold from every entry
/// and removes entries left empty. Returns the number of keys evicted.
/// Pruning and removal happen under the store's per-shard locks, so a pass
/// never tears an entry out from under a concurrent check.
pub(crate) fn sweep(
    entries: &DashMap<String, RateLimitEntry>,
    staleness_threshold_ms: i64,
    now_ms: i64,
) -> usize {
    let mut evicted = 0;
    entries.retain(|_, entry| {
        entry.prune(now_ms, staleness_threshold_ms);
        if entry.is_empty() {
            evicted += 1;
            false
        } else {
            true
        }
    });
    evicted
}
