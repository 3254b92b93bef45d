//! gamecheck - UDP liveness checker for hosted game servers
//!
//! Answers "is this game server online?" with a single UDP probe, cached
//! behind a short TTL, routed per hosted game by the request's Host header.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod probe;
pub mod tasks;

pub use api::AppState;
pub use config::{Config, GameRegistry};
pub use tasks::spawn_cleanup_task;
