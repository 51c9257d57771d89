//! Error types for PMU document loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or retrieving a document.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read a local document.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Network Errors ===
    /// Could not build the HTTP client.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// Request failed before a response arrived.
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Server answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    // === Content Errors ===
    /// Document bytes are not UTF-8 text.
    #[error("document at {location} is not UTF-8 text")]
    NotText { location: String },

    // === Catalog Errors ===
    /// Requested product is not in the catalog.
    #[error("unknown product '{name}' (not in the catalog)")]
    UnknownProduct { name: String },
}

impl IngestError {
    /// Whether this error means the document could not be retrieved at all.
    #[must_use]
    pub fn is_retrieval_failure(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. } | Self::Http { .. } | Self::HttpStatus { .. }
        )
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::HttpStatus {
            url: "https://example.com/neoverse/neoverse-n1.json".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "request to https://example.com/neoverse/neoverse-n1.json returned HTTP 404"
        );
    }

    #[test]
    fn test_retrieval_failure() {
        let err = IngestError::FileRead {
            path: PathBuf::from("/missing.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.is_retrieval_failure());
        assert!(
            !IngestError::UnknownProduct {
                name: "x".to_string()
            }
            .is_retrieval_failure()
        );
    }
}
