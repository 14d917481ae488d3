//! Store Errors
//!
//! Error types for product store operations.

use std::path::PathBuf;

use crate::domain::RecordError;

/// Errors that can occur while fetching product documents
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Seed file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seed file is not valid JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Seed file is JSON but not an array of documents
    #[error("Expected a JSON array of product documents in {}", .0.display())]
    NotAnArray(PathBuf),

    /// A single requested document failed the record boundary
    #[error("Invalid product document: {0}")]
    InvalidRecord(#[from] RecordError),
}
