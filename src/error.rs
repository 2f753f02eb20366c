// src/error.rs
// Standardized error types for the recap pipeline

use thiserror::Error;

/// Main error type for the recap library
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("subject not found upstream: {0}")]
    SubjectNotFound(String),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },
}

/// Convenience type alias for Result using RecapError
pub type Result<T> = std::result::Result<T, RecapError>;

impl RecapError {
    /// True for transient upstream failures that are safe to retry or skip
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RecapError::Upstream(_) | RecapError::UpstreamStatus { status: 500..=599, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_not_found_error() {
        let err = RecapError::SubjectNotFound("ghost".to_string());
        assert!(err.to_string().contains("subject not found"));
        assert!(err.to_string().contains("ghost"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_upstream_status_error() {
        let err = RecapError::UpstreamStatus {
            status: 503,
            url: "https://example.test/archive".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.is_transient());

        let err = RecapError::UpstreamStatus {
            status: 404,
            url: "https://example.test/archive".to_string(),
        };
        assert!(!err.is_transient());
    }
}
