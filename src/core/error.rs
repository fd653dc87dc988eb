//! Custom error types for the application.
//!
//! - [`FetchError`] - Transport-level failures below the gateway
//! - [`ValidationError`] - Form input rejected before submission
//! - [`ModuleError`] - A module could not produce data to render
//! - [`BootError`] - Startup could not complete

use std::fmt;

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Browser window not available
    NoWindow,
    /// Failed to create HTTP request
    RequestCreationFailed,
    /// Network request failed (CORS, DNS, offline, ...)
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    HttpError(u16),
    /// Failed to read response body
    ResponseReadFailed,
    /// Invalid response content (not text)
    InvalidContent,
    /// JSON parsing error
    JsonParseError(String),
    /// Request timed out
    Timeout,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::RequestCreationFailed => write!(f, "Failed to create request"),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::HttpError(status) => write!(f, "HTTP {}", status),
            Self::ResponseReadFailed => write!(f, "Failed to read response"),
            Self::InvalidContent => write!(f, "Invalid response content"),
            Self::JsonParseError(msg) => write!(f, "JSON parse error: {}", msg),
            Self::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for FetchError {}

/// A form field failed validation. Nothing is sent to the backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("unknown {field}: {value}")]
    UnknownOption { field: &'static str, value: String },
}

/// A module's render path could not produce anything to show.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModuleError {
    /// The remote load failed and the dataset has no placeholder.
    #[error("{page} data unavailable: {reason}")]
    Unavailable { page: &'static str, reason: String },
    /// A failure recorded in the content region, shown with a retry action.
    #[error("{0}")]
    Render(String),
}

/// Startup failure, shown full-screen with a retry action.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BootError {
    #[error("gateway unavailable: {0}")]
    Gateway(#[from] FetchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::HttpError(503).to_string(), "HTTP 503");
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            FetchError::NetworkError("offline".into()).to_string(),
            "Network error: offline"
        );
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::Missing("Name").to_string(), "Name is required");
        assert_eq!(
            ValidationError::OutOfRange {
                field: "Temperature",
                min: 0.0,
                max: 2.0
            }
            .to_string(),
            "Temperature must be between 0 and 2"
        );
    }

    #[test]
    fn test_boot_error_from_fetch() {
        let err: BootError = FetchError::NoWindow.into();
        assert_eq!(err.to_string(), "gateway unavailable: Browser window not available");
    }
}
