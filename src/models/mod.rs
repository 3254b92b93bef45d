//! Models Module
//!
//! Request and response DTOs for the checker API, plus target address
//! parsing.

pub mod requests;
pub mod responses;

pub use requests::{PrefillQuery, ProbeRequest, Target};
pub use responses::{HealthResponse, ProbeResponse, StatsResponse};
