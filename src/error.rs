// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! Every public service operation returns `Result<T, AppError>` rather than
//! panicking; callers always get failures back as values. This is the Rust
//! rendition of the backend SDK's `{data, error}` pair.

/// Application error type shared by all services.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Local validation failure, raised before any network call is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error reported by the remote backend (constraint violation, auth
    /// failure, transport error, ...).
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Unexpected local failure (filesystem, encoding), wrapped uniformly.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message for uploads exceeding the size limit.
    pub const FILE_TOO_LARGE: &'static str = "File size too large. Maximum 5MB allowed.";
    /// Message for image URLs that do not contain the storage bucket segment.
    pub const INVALID_IMAGE_URL: &'static str = "Invalid image URL";
    /// Message prefix for backend auth failures (expired or missing session).
    pub const AUTH_FAILED: &'static str = "Authentication failed";

    /// True for errors raised locally before any network call.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// True when the backend rejected the request as unauthenticated.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppError::Backend(msg) if msg.contains(Self::AUTH_FAILED))
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_validation_error() {
        assert!(AppError::Validation(AppError::FILE_TOO_LARGE.to_string())
            .is_validation_error());
        assert!(!AppError::Backend("HTTP 500: oops".to_string()).is_validation_error());
    }

    #[test]
    fn test_is_auth_error() {
        let err = AppError::Backend(format!("{}: HTTP 401", AppError::AUTH_FAILED));
        assert!(err.is_auth_error());

        let err = AppError::Backend("HTTP 409: duplicate key".to_string());
        assert!(!err.is_auth_error());
    }
}
