//! CORS Error Types
//!
//! Registry failures never reach the client. The engine logs them and
//! answers "not allowed", so this enum has no HTTP rendering.

use thiserror::Error;

pub type CorsResult<T> = Result<T, CorsError>;

#[derive(Debug, Error)]
pub enum CorsError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error (registry unavailable, bad configuration)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CorsError {
    /// Stable label for structured logs
    pub fn label(&self) -> &'static str {
        match self {
            CorsError::Database(_) => "database",
            CorsError::Internal(_) => "internal",
        }
    }

    pub(crate) fn log(&self, domain: &str) {
        tracing::error!(
            error = %self,
            kind = self.label(),
            domain = %domain,
            "Custom domain lookup failed"
        );
    }
}
