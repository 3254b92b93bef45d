//! Response DTOs for the checker API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the probe endpoint (POST /api)
///
/// The capitalized JSON keys are part of the wire contract consumed by
/// the landing page script.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProbeResponse {
    /// Whether the target answered the probe
    #[serde(rename = "Server")]
    pub server: bool,
    /// True when this request ran the probe, false when the outcome was
    /// served from cache
    #[serde(rename = "Fresh")]
    pub fresh: bool,
}

impl ProbeResponse {
    /// Outcome computed by this request's own probe.
    pub fn fresh(server: bool) -> Self {
        Self {
            server,
            fresh: true,
        }
    }

    /// Outcome served from a prior probe within the TTL window.
    pub fn cached(server: bool) -> Self {
        Self {
            server,
            fresh: false,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of probe outcomes served from cache
    pub hits: u64,
    /// Number of lookups that required a fresh probe
    pub misses: u64,
    /// Number of entries evicted by the capacity bound
    pub evictions: u64,
    /// Current number of live cache entries
    pub entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(hits: u64, misses: u64, evictions: u64, entries: usize) -> Self {
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            evictions,
            entries,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
