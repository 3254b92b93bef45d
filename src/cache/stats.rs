//! Cache Statistics Module
//!
//! Tracks probe cache performance metrics.

use serde::Serialize;

// == Probe Stats ==
/// Tracks probe cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProbeStats {
    /// Number of probe outcomes served from cache
    pub hits: u64,
    /// Number of lookups that required a fresh probe (absent or expired)
    pub misses: u64,
    /// Number of entries evicted by the capacity bound
    pub evictions: u64,
    /// Current number of live entries in the cache
    pub entries: usize,
}

impl ProbeStats {
    // == Constructor ==
    /// Creates a new ProbeStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
