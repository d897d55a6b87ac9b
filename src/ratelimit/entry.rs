//! Per-key timestamp bookkeeping.

/// The record of admitted requests for a single key.
///
/// Timestamps are millisecond epoch instants in ascending insertion order.
/// Expired instants always form a prefix of the sequence, so pruning never
/// reorders what remains.
#[derive(Debug, Default)]
pub struct RateLimitEntry {
    /// Admitted request instants not yet known to be expired
    timestamps: Vec<i64>,
}

impl RateLimitEntry {
    /// Create an empty entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every timestamp that has slid out of the window.
    ///
    /// A timestamp exactly `window_ms` old counts as expired (the retention
    /// condition is strict `<`).
    pub fn prune(&mut self, now_ms: i64, window_ms: i64) {
        self.timestamps.retain(|&t| now_ms - t < window_ms);
    }

    /// Record an admitted request at `now_ms`.
    ///
    /// Callers admit in clock order, so the sequence stays ascending.
    /// Same-millisecond admissions are kept as distinct entries.
    pub fn record(&mut self, now_ms: i64) {
        self.timestamps.push(now_ms);
    }

    /// The oldest in-window timestamp, if any.
    pub fn oldest(&self) -> Option<i64> {
        self.timestamps.first().copied()
    }

    /// Number of in-window timestamps.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the entry holds no timestamps.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_empty() {
        let entry = RateLimitEntry::new();
        assert!(entry.is_empty());
        assert_eq!(entry.len(), 0);
        assert_eq!(entry.oldest(), None);
    }

    #[test]
    fn test_prune_removes_expired_prefix() {
        let mut entry = RateLimitEntry::new();
        entry.record(0);
        entry.record(500);
        entry.record(900);

        entry.prune(1_200, 1_000);

        assert_eq!(entry.len(), 2);
        assert_eq!(entry.oldest(), Some(500));
    }

    #[test]
    fn test_prune_boundary_is_exclusive() {
        let mut entry = RateLimitEntry::new();
        entry.record(0);

        // Exactly one window old: expired
        entry.prune(1_000, 1_000);
        assert!(entry.is_empty());
    }

    #[test]
    fn test_prune_keeps_just_inside_window() {
        let mut entry = RateLimitEntry::new();
        entry.record(1);

        entry.prune(1_000, 1_000);
        assert_eq!(entry.len(), 1);
    }

    #[test]
    fn test_same_millisecond_records_are_distinct() {
        let mut entry = RateLimitEntry::new();
        entry.record(42);
        entry.record(42);
        entry.record(42);

        assert_eq!(entry.len(), 3);
    }

    #[test]
    fn test_prune_with_non_positive_window_forgets_everything() {
        let mut entry = RateLimitEntry::new();
        entry.record(100);
        entry.record(100);

        entry.prune(100, 0);
        assert!(entry.is_empty());
    }
}
