//! Artwork store abstraction
//!
//! This module defines the `ArtworkStore` trait the submission pipeline writes through.

use async_trait::async_trait;
use bytes::Bytes;
use dashprints_core::{SanitizedName, StoredArtwork};
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persists accepted artwork uploads.
///
/// Writes are plain overwrites with no versioning. Files are never removed.
#[async_trait]
pub trait ArtworkStore: Send + Sync {
    /// Write `data` under `name` for the given submission and return where it landed.
    async fn store(
        &self,
        submission_id: Uuid,
        name: &SanitizedName,
        data: Bytes,
    ) -> StorageResult<StoredArtwork>;
}
