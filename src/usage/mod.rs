//! Usage-frequency tracking and scarcity ranking.
//!
//! Every champion featured in a generated title bumps a per-name counter.
//! Ranking sorts candidate names by how rarely they have been featured so
//! far, so repeated listings rotate through an account pool instead of
//! leading with the same marquee names every time.

pub mod store;

use tracing::{debug, warn};

pub use store::{JsonFileStore, MemoryStore, UsageCounters, UsageStore};

use crate::core::errors::Result;

/// Counter map plus its backing store.
#[derive(Debug)]
pub struct UsageTracker<S: UsageStore> {
    store: S,
    counters: UsageCounters,
}

impl<S: UsageStore> UsageTracker<S> {
    /// Load counters from the store. Failure to read history starts the
    /// tracker empty rather than blocking the run.
    pub fn load(store: S) -> Self {
        let counters = match store.load() {
            Ok(counters) => counters,
            Err(error) => {
                warn!(%error, "failed to load usage counters, starting empty");
                UsageCounters::new()
            }
        };
        Self { store, counters }
    }

    /// Times `name` has been recorded so far.
    #[must_use]
    pub fn count(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn counters(&self) -> &UsageCounters {
        &self.counters
    }

    /// Increment each name by one and persist the whole map.
    ///
    /// Persistence is best effort: a failed save keeps the in-memory
    /// increments and logs, so one bad write does not abort a listing run.
    pub fn record<I, N>(&mut self, names: I)
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut recorded = 0usize;
        for name in names {
            *self.counters.entry(name.as_ref().to_string()).or_insert(0) += 1;
            recorded += 1;
        }
        if recorded == 0 {
            return;
        }
        debug!(recorded, "recorded usage counters");
        if let Err(error) = self.store.save(&self.counters) {
            warn!(%error, "failed to persist usage counters");
        }
    }

    /// Sort `names` scarcest first: ascending recorded count, ties broken
    /// by name. Names never recorded count as zero. Duplicates and the
    /// stability of equal keys are preserved.
    #[must_use]
    pub fn rank_by_scarcity(&self, names: &[String]) -> Vec<String> {
        let mut ranked = names.to_vec();
        ranked.sort_by(|a, b| {
            self.count(a)
                .cmp(&self.count(b))
                .then_with(|| a.cmp(b))
        });
        ranked
    }

    /// Drop all counters, in memory and in the store.
    pub fn reset(&mut self) -> Result<()> {
        self.counters.clear();
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn record_increments_each_name() {
        let mut tracker = UsageTracker::load(MemoryStore::new());
        tracker.record(["Ahri", "Zed"]);
        tracker.record(["Ahri"]);
        assert_eq!(tracker.count("Ahri"), 2);
        assert_eq!(tracker.count("Zed"), 1);
        assert_eq!(tracker.count("Lux"), 0);
    }

    #[test]
    fn record_persists_across_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("usage-stats.json");

        let mut tracker = UsageTracker::load(JsonFileStore::new(path.clone()));
        tracker.record(["Ahri", "Ahri", "Zed"]);

        let reloaded = UsageTracker::load(JsonFileStore::new(path));
        assert_eq!(reloaded.count("Ahri"), 2);
        assert_eq!(reloaded.count("Zed"), 1);
    }

    #[test]
    fn record_empty_iterator_skips_save() {
        let mut tracker = UsageTracker::load(MemoryStore::new());
        tracker.record(Vec::<String>::new());
        assert!(tracker.counters().is_empty());
    }

    #[test]
    fn ranking_puts_scarce_names_first() {
        let mut tracker = UsageTracker::load(MemoryStore::new());
        tracker.record(["Ahri", "Ahri", "Ahri", "Zed"]);
        assert_eq!(
            tracker.rank_by_scarcity(&names(&["Ahri", "Lux", "Zed"])),
            names(&["Lux", "Zed", "Ahri"])
        );
    }

    #[test]
    fn equal_counts_break_ties_by_name() {
        let tracker = UsageTracker::load(MemoryStore::new());
        assert_eq!(
            tracker.rank_by_scarcity(&names(&["Zed", "Ahri", "Lux"])),
            names(&["Ahri", "Lux", "Zed"])
        );
    }

    #[test]
    fn ranking_preserves_duplicates() {
        let tracker = UsageTracker::load(MemoryStore::new());
        assert_eq!(
            tracker.rank_by_scarcity(&names(&["Ahri", "Ahri"])),
            names(&["Ahri", "Ahri"])
        );
    }

    #[test]
    fn ranking_does_not_mutate_counters() {
        let tracker = UsageTracker::load(MemoryStore::new());
        let _ = tracker.rank_by_scarcity(&names(&["Ahri", "Zed"]));
        assert!(tracker.counters().is_empty());
    }

    #[test]
    fn reset_clears_memory_and_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("usage-stats.json");

        let mut tracker = UsageTracker::load(JsonFileStore::new(path.clone()));
        tracker.record(["Ahri"]);
        tracker.reset().expect("reset should succeed");

        assert_eq!(tracker.count("Ahri"), 0);
        assert!(!path.exists());
        let reloaded = UsageTracker::load(JsonFileStore::new(path));
        assert!(reloaded.counters().is_empty());
    }

    #[test]
    fn corrupt_store_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("usage-stats.json");
        std::fs::write(&path, "][").expect("write corrupt stats");
        let tracker = UsageTracker::load(JsonFileStore::new(path));
        assert!(tracker.counters().is_empty());
    }
}
