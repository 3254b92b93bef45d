//! Probe Module
//!
//! Single-shot UDP liveness probes.

mod client;

pub use client::{ProbeClient, DEFAULT_PROBE_TIMEOUT_SECS};
