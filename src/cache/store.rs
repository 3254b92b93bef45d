//! Probe Cache Module
//!
//! TTL cache for probe outcomes keyed by `ip:port`, combining HashMap
//! storage with insertion-order tracking for capacity eviction.

use std::collections::HashMap;

use crate::cache::{InsertionOrder, ProbeEntry, ProbeStats};

// == Probe Cache ==
/// Caches the latest probe outcome per target address.
///
/// A key has at most one live entry. Entries expire after the TTL and
/// are dropped lazily at read time (or by the background cleanup task);
/// when the cache is at capacity, the least recently *inserted* entry is
/// evicted first, independent of TTL.
#[derive(Debug)]
pub struct ProbeCache {
    /// Outcome storage, keyed by canonical `ip:port`
    entries: HashMap<String, ProbeEntry>,
    /// Insertion-order tracker for capacity eviction
    order: InsertionOrder,
    /// Performance statistics
    stats: ProbeStats,
    /// Maximum number of live entries
    max_entries: usize,
    /// Entry lifetime in seconds
    ttl: u64,
}

impl ProbeCache {
    // == Constructor ==
    /// Creates a new ProbeCache.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of live entries
    /// * `ttl` - Entry lifetime in seconds
    pub fn new(max_entries: usize, ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: ProbeStats::new(),
            max_entries,
            ttl,
        }
    }

    // == Lookup ==
    /// Returns the live entry for a key, if any.
    ///
    /// Entries past their TTL behave as absent: they are removed here and
    /// counted as misses. A hit does not refresh the entry or its position
    /// in the eviction queue.
    pub fn lookup(&mut self, key: &str) -> Option<ProbeEntry> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.order.remove(key);
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let entry = *entry;
                self.stats.record_hit();
                Some(entry)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Store ==
    /// Records a probe outcome for a key.
    ///
    /// Overwrites any previous entry for the key and resets its insertion
    /// time. When the cache is full and the key is new, the least recently
    /// inserted entry is evicted first.
    pub fn store(&mut self, key: &str, server_online: bool) -> ProbeEntry {
        let is_overwrite = self.entries.contains_key(key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.order.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        let entry = ProbeEntry::new(server_online, self.ttl);
        self.entries.insert(key.to_string(), entry);
        self.order.record(key);

        entry
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.order.remove(&key);
        }

        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> ProbeStats {
        let mut stats = self.stats.clone();
        stats.entries = self.entries.len();
        stats
    }

    // == Length ==
    /// Returns the current number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
