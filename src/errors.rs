// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for the relay and recommendation API

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::{json, Value};
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every failure a client or handler can report.
/// The recommendation pipeline absorbs these into fallbacks; only the HTTP
/// layer turns them into responses.
#[derive(Error, Debug)]
pub enum LunchError {
    /// Upstream provider unreachable or answered with a non-2xx status.
    /// `status` is None when no HTTP response was received at all.
    #[error("{service} request failed")]
    Upstream {
        service: String,
        status: Option<u16>,
        details: Value,
    },

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0} is not configured")]
    NotConfigured(String),

    #[error("API endpoint not found")]
    NotFound,
}

impl LunchError {
    /// Build an upstream error for a request that never got a response
    pub fn unreachable(service: &str, cause: impl std::fmt::Display) -> Self {
        LunchError::Upstream {
            service: service.to_string(),
            status: None,
            details: Value::String(cause.to_string()),
        }
    }

    /// Detail payload placed next to the message in the error envelope
    fn details(&self) -> Value {
        match self {
            LunchError::Upstream { details, .. } => details.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

/// Convert LunchError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and the
/// `{error, details}` envelope shared by every route
impl ResponseError for LunchError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": self.to_string(),
            "details": self.details(),
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            LunchError::Upstream { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            LunchError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LunchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LunchError::ValidationError(_) => StatusCode::BAD_REQUEST,
            LunchError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LunchError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}
