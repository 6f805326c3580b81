// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::baas::BaasError;

/// HTTP API error rendered as `{ "error": <code>, "message": <text> }`
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError(String),
    Rejected { code: &'static str, message: String },

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict { code: &'static str, message: String },

    // 500 Internal Server Error
    Internal { code: &'static str, message: String },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError(_) => 400,
            ApiError::Rejected { .. } => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict { .. } => 409,
            ApiError::Internal { .. } => 500,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(msg) => msg,
            ApiError::Rejected { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict { message, .. } => message,
            ApiError::Internal { message, .. } => message,
        }
    }

    /// Machine-readable code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "validation_error",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Rejected { code, .. } => *code,
            ApiError::Conflict { code, .. } => *code,
            ApiError::Internal { code, .. } => *code,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": self.error_code(),
            "message": self.message()
        })
    }
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Conflict { code, message: message.into() }
    }

    pub fn rejected(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Rejected { code, message: message.into() }
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Internal { code, message: message.into() }
    }
}

// Failure-origin mapping for BaaS errors.
//
// The same upstream failure maps differently depending on where it happened:
// a list read is an internal failure, an id lookup is "not found", and a
// write the backend refused is the caller's problem.
impl ApiError {
    /// List and existence reads: always 500
    pub fn read_failure(err: BaasError) -> Self {
        tracing::error!("BaaS read failed: {}", err);
        match err {
            BaasError::Decode(msg) => ApiError::internal("parse_error", format!("Failed to parse response: {}", msg)),
            other => ApiError::internal("database_error", other.to_string()),
        }
    }

    /// Get-by-id reads: any failure reads as the resource being absent
    pub fn lookup_failure(err: BaasError, not_found: &str) -> Self {
        tracing::warn!("BaaS lookup failed, reporting not found: {}", err);
        ApiError::not_found(not_found)
    }

    /// Sign-up and sign-in: a refusal is a 400 carrying `code`, an
    /// unreachable or garbled auth service is a 500
    pub fn auth_failure(err: BaasError, code: &'static str) -> Self {
        match err {
            BaasError::Rejected { status, body } => {
                tracing::warn!(status, code, "BaaS refused credentials: {}", body);
                ApiError::rejected(code, body)
            }
            BaasError::Decode(msg) => {
                tracing::error!("BaaS auth response undecodable: {}", msg);
                ApiError::internal("parse_error", format!("Failed to parse response: {}", msg))
            }
            other => {
                tracing::error!("BaaS auth call failed: {}", other);
                ApiError::internal("database_error", other.to_string())
            }
        }
    }

    /// Writes: a rejection is a 400 carrying `code`, anything else is a 500
    pub fn write_failure(err: BaasError, code: &'static str) -> Self {
        match err {
            BaasError::Rejected { status, body } => {
                tracing::warn!(status, code, "BaaS rejected write: {}", body);
                ApiError::rejected(code, body)
            }
            BaasError::Decode(msg) => {
                tracing::error!("BaaS write response undecodable: {}", msg);
                ApiError::internal("parse_error", format!("Failed to parse response: {}", msg))
            }
            other => {
                tracing::error!("BaaS write failed: {}", other);
                ApiError::internal("database_error", other.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
