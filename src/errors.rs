// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Request-level error types
/// DOCUMENTATION: Every failure a handler can report to the caller
/// Each variant maps to an HTTP status code and a `{"error": ...}` body
#[derive(Error, Debug)]
pub enum MoviesError {
    #[error("invalid json")]
    InvalidJson,

    #[error("invalid id")]
    InvalidId,

    #[error("{0}")]
    ValidationError(String),

    #[error("not found")]
    NotFound,

    /// Storage failure; the driver's text is returned to the caller as-is
    #[error("{0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for MoviesError {
    fn from(e: sqlx::Error) -> Self {
        MoviesError::DatabaseError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for MoviesError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        MoviesError::ValidationError(message)
    }
}

/// Convert MoviesError to HTTP response
impl ResponseError for MoviesError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            MoviesError::InvalidJson => StatusCode::BAD_REQUEST,
            MoviesError::InvalidId => StatusCode::BAD_REQUEST,
            MoviesError::ValidationError(_) => StatusCode::BAD_REQUEST,
            MoviesError::NotFound => StatusCode::NOT_FOUND,
            MoviesError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Startup configuration failures; all of them stop the process
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing env var: {0}")]
    Missing(&'static str),

    #[error("invalid value for env var {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Readiness gate failure, only possible when a deadline is configured
#[derive(Error, Debug)]
pub enum ReadinessError {
    #[error("database not ready after {waited:?} ({attempts} attempts), last error: {last_error}")]
    TimedOut {
        waited: Duration,
        attempts: u32,
        last_error: String,
    },
}
