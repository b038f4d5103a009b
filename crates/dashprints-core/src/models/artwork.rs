use std::path::PathBuf;

use bytes::Bytes;
use uuid::Uuid;

use crate::validation::SanitizedName;

/// An artwork file as received in the multipart body, before validation
#[derive(Debug, Clone)]
pub struct UploadedArtwork {
    pub original_filename: String,
    pub content: Bytes,
    /// Content type declared by the client. Informational only.
    pub content_type: Option<String>,
}

impl UploadedArtwork {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// An accepted artwork file written to the artwork store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtwork {
    pub submission_id: Uuid,
    pub name: SanitizedName,
    pub path: PathBuf,
    pub size_bytes: u64,
}
