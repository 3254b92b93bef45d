//! Error types for the checker service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Config Error Enum ==
/// Startup configuration failures.
///
/// All of these are fatal: the process exits before binding the listener
/// rather than serving with partial or invalid game configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid YAML or misses required keys
    #[error("invalid YAML in config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration parsed but violates a structural rule
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// == App Error Enum ==
/// Unified request-path error type for the checker service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request did not contain a usable target address
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // The /api contract reports parse failures in the body, not the
            // status line; the landing page script only inspects the JSON.
            AppError::InvalidTarget(_) => {
                (StatusCode::OK, Json(json!({ "status": "Error" }))).into_response()
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": msg })),
            )
                .into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the checker service.
pub type Result<T> = std::result::Result<T, AppError>;
