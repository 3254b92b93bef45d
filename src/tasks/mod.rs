//! Tasks Module
//!
//! Background maintenance tasks for the probe cache.

pub mod cleanup;

pub use cleanup::spawn_cleanup_task;
