//! API Module
//!
//! HTTP handlers and routing for the checker service.
//!
//! # Endpoints
//! - `GET /` - Landing page with a pre-filled probe target
//! - `POST /api` - Probe a target address (cached behind a short TTL)
//! - `GET /stats` - Probe cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
