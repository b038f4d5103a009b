use crate::keys::generate_artwork_key;
use crate::traits::{ArtworkStore, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use dashprints_core::{SanitizedName, StoredArtwork};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Local filesystem artwork store
#[derive(Clone)]
pub struct LocalArtworkStore {
    base_path: PathBuf,
}

impl LocalArtworkStore {
    /// Create a new store rooted at `base_path`, creating the directory if needed
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create uploads directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalArtworkStore { base_path })
    }

    /// Convert a storage key to a filesystem path under the base directory.
    ///
    /// Only plain relative components are accepted.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty() || storage_key.starts_with('/') || storage_key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        let escapes = Path::new(storage_key)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(StorageError::InvalidKey(
                "Storage key resolves outside uploads directory".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ArtworkStore for LocalArtworkStore {
    async fn store(
        &self,
        submission_id: Uuid,
        name: &SanitizedName,
        data: Bytes,
    ) -> StorageResult<StoredArtwork> {
        let key = generate_artwork_key(submission_id, name);
        let path = self.key_to_path(&key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Artwork stored"
        );

        Ok(StoredArtwork {
            submission_id,
            name: name.clone(),
            path,
            size_bytes: size as u64,
        })
    }
}
