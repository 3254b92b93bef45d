//! Cache Entry Module
//!
//! Defines the record kept for each probed address.

use std::time::{SystemTime, UNIX_EPOCH};

// == Probe Entry ==
/// Outcome of the most recent probe for one `ip:port` key.
///
/// Whether an entry is "fresh" is not stored here: freshness is a
/// per-request fact (did *this* request run the probe?) computed by the
/// endpoint, not a property of the cached outcome.
#[derive(Debug, Clone, Copy)]
pub struct ProbeEntry {
    /// Whether the target answered the probe
    pub server_online: bool,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl ProbeEntry {
    // == Constructor ==
    /// Creates a new entry that expires `ttl_seconds` from now.
    pub fn new(server_online: bool, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            server_online,
            inserted_at: now,
            expires_at: now + ttl_seconds * 1000,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to the expiration time, so a full TTL window
    /// must have elapsed before the outcome is discarded.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds (0 once expired).
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
