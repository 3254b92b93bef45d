//! Cache Module
//!
//! TTL cache for probe outcomes with capacity-bounded, oldest-first
//! eviction. Deduplicates rapid repeat probes of the same address so the
//! upstream game server is shielded from probe storms.

mod entry;
mod order;
mod stats;
mod store;


// Re-export public types
pub use entry::ProbeEntry;
pub use order::InsertionOrder;
pub use stats::ProbeStats;
pub use store::ProbeCache;
