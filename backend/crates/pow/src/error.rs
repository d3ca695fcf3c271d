//! PoW Error Types
//!
//! This module provides PoW-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// PoW-specific result type alias
pub type PowResult<T> = Result<T, PowError>;

/// Detail returned for every rejected challenge, whatever the cause
pub const REJECTION_MESSAGE: &str = "Challenge verification failed";

/// PoW-specific error variants
///
/// Rejection variants are distinct for logs and callers but all render as
/// the same `400` body, so clients cannot probe which check failed.
#[derive(Debug, Error)]
pub enum PowError {
    /// Unknown token
    #[error("Challenge not found")]
    ChallengeNotFound,

    /// Challenge has expired (TTL exceeded)
    #[error("Challenge expired")]
    ChallengeExpired,

    /// Challenge was already used
    #[error("Challenge already consumed")]
    ChallengeAlreadyConsumed,

    /// Solution does not satisfy the predicate
    #[error("Solution invalid")]
    SolutionInvalid,

    /// Malformed verification input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PowError {
    /// Whether this is a challenge rejection (as opposed to a failure)
    pub fn is_rejection(&self) -> bool {
        !matches!(self, PowError::Database(_) | PowError::Internal(_))
    }

    /// Stable label for structured logs
    pub fn label(&self) -> &'static str {
        match self {
            PowError::ChallengeNotFound => "challenge_not_found",
            PowError::ChallengeExpired => "challenge_expired",
            PowError::ChallengeAlreadyConsumed => "challenge_already_consumed",
            PowError::SolutionInvalid => "solution_invalid",
            PowError::InvalidRequest(_) => "invalid_request",
            PowError::Database(_) => "database",
            PowError::Internal(_) => "internal",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        if self.is_rejection() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        if self.is_rejection() {
            ErrorKind::BadRequest
        } else {
            ErrorKind::InternalServerError
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PowError::Database(e) => {
                tracing::error!(error = %e, kind = self.label(), "PoW database error");
            }
            PowError::Internal(msg) => {
                tracing::error!(message = %msg, kind = self.label(), "PoW internal error");
            }
            _ => {
                tracing::debug!(kind = self.label(), "PoW rejection");
            }
        }
    }
}

impl From<PowError> for AppError {
    fn from(err: PowError) -> Self {
        if err.is_rejection() {
            AppError::bad_request(REJECTION_MESSAGE).with_action("Request a new challenge")
        } else {
            AppError::new(err.kind(), err.to_string()).with_context(err.label())
        }
    }
}

impl IntoResponse for PowError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
