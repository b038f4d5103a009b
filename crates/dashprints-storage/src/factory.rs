use crate::{ArtworkStore, LocalArtworkStore, StorageResult};
use dashprints_core::Config;
use std::sync::Arc;

/// Create the artwork store from configuration, creating `UPLOADS_DIR` if absent
pub async fn create_artwork_store(config: &Config) -> StorageResult<Arc<dyn ArtworkStore>> {
    let store = LocalArtworkStore::new(config.uploads_dir()).await?;
    tracing::info!(
        path = %config.uploads_dir().display(),
        "Artwork store initialized"
    );
    Ok(Arc::new(store))
}
