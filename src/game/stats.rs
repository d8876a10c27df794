//! Search statistics shared by every clone of a game

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Evaluation counts and search time accumulated over a whole game
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Heuristic evaluations performed, keyed by search depth
    pub evaluations_per_depth: BTreeMap<u32, u64>,
    /// Wall-clock seconds spent choosing moves
    pub total_seconds: f64,
}

impl SearchStats {
    pub fn record_evaluations(&mut self, depth: u32, count: u64) {
        *self.evaluations_per_depth.entry(depth).or_insert(0) += count;
    }

    /// Fold a worker's local tally into the totals
    pub fn merge(&mut self, tally: &BTreeMap<u32, u64>) {
        for (&depth, &count) in tally {
            self.record_evaluations(depth, count);
        }
    }

    pub fn total_evaluations(&self) -> u64 {
        self.evaluations_per_depth.values().sum()
    }

    /// Evaluations per second over the whole game
    pub fn evaluations_per_second(&self) -> Option<f64> {
        if self.total_seconds > 0.0 {
            Some(self.total_evaluations() as f64 / self.total_seconds)
        } else {
            None
        }
    }

    /// `depth:count` pairs in depth order, e.g. `1:12 2:130`
    pub fn per_depth_summary(&self) -> String {
        self.evaluations_per_depth
            .iter()
            .map(|(depth, count)| format!("{}:{}", depth, count))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Statistics handle shared between a game and its search clones
#[derive(Debug, Clone, Default)]
pub struct SharedStats(Arc<Mutex<SearchStats>>);

impl SharedStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with the statistics locked
    ///
    /// A worker that panicked mid-update leaves counts that are still usable,
    /// so a poisoned lock is recovered rather than propagated.
    pub fn with<R>(&self, f: impl FnOnce(&mut SearchStats) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Copy of the current totals
    pub fn snapshot(&self) -> SearchStats {
        self.with(|stats| stats.clone())
    }

    /// Do both handles point at the same accumulator?
    pub fn ptr_eq(&self, other: &SharedStats) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_summary() {
        let mut stats = SearchStats::default();
        stats.record_evaluations(2, 10);
        stats.record_evaluations(1, 3);
        stats.record_evaluations(2, 5);
        assert_eq!(stats.total_evaluations(), 18);
        assert_eq!(stats.per_depth_summary(), "1:3 2:15");
    }

    #[test]
    fn test_evaluations_per_second() {
        let mut stats = SearchStats::default();
        assert_eq!(stats.evaluations_per_second(), None);
        stats.record_evaluations(1, 100);
        stats.total_seconds = 2.0;
        assert_eq!(stats.evaluations_per_second(), Some(50.0));
    }

    #[test]
    fn test_shared_handles_see_same_counts() {
        let shared = SharedStats::new();
        let other = shared.clone();
        other.with(|s| s.record_evaluations(3, 7));
        assert_eq!(shared.snapshot().total_evaluations(), 7);
        assert!(shared.ptr_eq(&other));
    }
}
