//! Error types for upstream sources

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias using SourceError
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors produced by upstream collaborators (comparison source, release
/// listing, classifier).
///
/// Only a failure of the top-level comparison call aborts changelog
/// generation; individual PR lookups and the classification refinement pass
/// degrade gracefully instead of surfacing these.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Repository, owner, or ref does not exist
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Upstream request quota exhausted
    #[error("Rate limited, resets at {reset:?}")]
    RateLimited { reset: Option<DateTime<Utc>> },

    /// Any other non-success response from a collaborator
    #[error("Upstream error: {status} - {message}")]
    Upstream { status: u16, message: String },

    /// Transport-level failure (connection, TLS, decode)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl SourceError {
    /// Create a not-found error for a resource path
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_not_found_display() {
        let err = SourceError::not_found("owner/repo");
        assert_eq!(err.to_string(), "Not found: owner/repo");
    }

    #[test]
    fn test_rate_limited_display() {
        let reset = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let err = SourceError::RateLimited { reset: Some(reset) };
        assert!(err.to_string().starts_with("Rate limited"));
    }
}
