use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::models::RequiredField;

/// Message shown to the user when the lead could not be delivered.
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "There was an error submitting your application. Please try again.";

/// First rule a lead record violates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent or blank.
    MissingField(RequiredField),
    InvalidEmail,
    InvalidPhone,
    ConsentRequired,
}

impl ValidationError {
    /// Wire key of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field.key(),
            ValidationError::InvalidEmail => "email",
            ValidationError::InvalidPhone => "phone",
            ValidationError::ConsentRequired => "consent",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => {
                write!(f, "Please fill in the {} field.", field.label())
            }
            ValidationError::InvalidEmail => write!(f, "Please enter a valid email address."),
            ValidationError::InvalidPhone => {
                write!(f, "Please enter a valid 10-digit phone number.")
            }
            ValidationError::ConsentRequired => {
                write!(f, "Please agree to receive information to proceed.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure of a single attempt to deliver a lead upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// 5xx response.
    Server { status: u16, body: String },
    /// 4xx response. Never retried.
    Client { status: u16, body: String },
    /// Any other non-2xx status (1xx/3xx that slipped past redirects).
    UnexpectedStatus { status: u16, body: String },
    /// No response within the per-attempt timeout.
    Timeout,
    /// Connection, DNS or protocol failure before a status was received.
    Network(String),
    /// 2xx whose body was not JSON.
    Decode(String),
}

impl SubmissionError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubmissionError::Server { .. }
                | SubmissionError::Timeout
                | SubmissionError::Network(_)
                | SubmissionError::Decode(_)
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::Server { status, .. }
            | SubmissionError::Client { status, .. }
            | SubmissionError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn reason_phrase(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::Server { status, body }
            | SubmissionError::Client { status, body }
            | SubmissionError::UnexpectedStatus { status, body } => write!(
                f,
                "HTTP {}: {}. Response: {}",
                status,
                reason_phrase(*status),
                body
            ),
            SubmissionError::Timeout => write!(
                f,
                "Request timeout. Please check your connection and try again."
            ),
            SubmissionError::Network(msg) => write!(f, "Network error: {}", msg),
            SubmissionError::Decode(msg) => write!(f, "Failed to decode response: {}", msg),
        }
    }
}

impl std::error::Error for SubmissionError {}

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// Lead failed field validation.
    Validation(ValidationError),
    /// Lead could not be delivered upstream.
    SubmissionFailed(SubmissionError),
    /// Resource not found error.
    NotFound(String),
    /// Request body could not be read as a lead record.
    BadRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::SubmissionFailed(e) => write!(f, "Submission failed: {}", e),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            AppError::SubmissionFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    /// Maps each error variant to an HTTP status code and JSON body.
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(e) => {
                tracing::debug!("Lead rejected by validation: {}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({
                        "success": false,
                        "error": e.to_string(),
                        "field": e.field(),
                    }),
                )
            }
            AppError::SubmissionFailed(e) => {
                tracing::error!("Lead submission failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "success": false,
                        "message": SUBMISSION_FAILED_MESSAGE,
                        "error": e.to_string(),
                    }),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::BadRequest(msg) => {
                tracing::debug!("Malformed request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "success": false, "error": msg }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        AppError::SubmissionFailed(err)
    }
}
