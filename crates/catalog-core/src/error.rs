//! Error types for the catalog clone engine.
//!
//! Every failure aborts the current run. The variants are grouped by the
//! layer that produces them so callers can tell a flaky connection apart from
//! a broken response contract.

use crate::models::ApiErrorDetail;
use thiserror::Error;

/// Main error type for catalog clone operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    // Transport errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Rate limited by {service}, retry after {retry_after_secs:?} seconds")]
    RateLimited {
        service: String,
        retry_after_secs: Option<u64>,
    },

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    // Remote errors reported inside an otherwise well-formed response
    #[error("{operation} returned errors: {}", format_api_errors(.errors))]
    RemoteValidation {
        operation: String,
        errors: Vec<ApiErrorDetail>,
    },

    // Clone engine errors
    #[error("Cloned catalog object not found in batch response: {source_id}")]
    Reconciliation { source_id: String },

    #[error("No target {reference} mapped for source id {source_id}")]
    ReferenceIntegrity {
        reference: &'static str,
        source_id: String,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

fn format_api_errors(errors: &[ApiErrorDetail]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout(std::time::Duration::from_secs(0))
        } else {
            CatalogError::Network {
                message: err.to_string(),
                cause: std::error::Error::source(&err).map(|s| s.to_string()),
            }
        }
    }
}

impl CatalogError {
    /// Build a remote validation error for a response that carried errors.
    pub fn remote(operation: impl Into<String>, errors: Vec<ApiErrorDetail>) -> Self {
        CatalogError::RemoteValidation {
            operation: operation.into(),
            errors,
        }
    }

    /// True for failures raised by the transport rather than the clone engine.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CatalogError::Network { .. }
                | CatalogError::Timeout(_)
                | CatalogError::RateLimited { .. }
                | CatalogError::Http { .. }
        )
    }

    /// Check if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Network { .. }
            | CatalogError::Timeout(_)
            | CatalogError::RateLimited { .. } => true,
            CatalogError::Http { status, .. } => matches!(status, 408 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}
