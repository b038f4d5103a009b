//! Upload validation
//!
//! Checks an artwork filename against the extension allow-list and produces a
//! [`SanitizedName`] that is safe to use as a single path segment.

use std::fmt;

/// Stem used when nothing of the original stem survives sanitization
const FALLBACK_STEM: &str = "artwork";

/// Reasons an uploaded artwork file is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File has no extension: {0}")]
    NoExtension(String),

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    DisallowedExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },
}

/// A filename with no directory components and only `[A-Za-z0-9._-]` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedName(String);

impl SanitizedName {
    /// Sanitize `raw` and wrap it. Returns `None` when nothing usable remains.
    pub fn new(raw: &str) -> Option<Self> {
        let sanitized = sanitize_filename(raw);
        if sanitized.is_empty() {
            None
        } else {
            Some(SanitizedName(sanitized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip directory components and unsafe characters from a filename.
///
/// Separators become spaces, whitespace runs become a single `_`, anything
/// outside `[A-Za-z0-9._-]` is dropped, then leading and trailing `.`/`_` are
/// trimmed. The result may be empty. Applying it twice gives the same result.
pub fn sanitize_filename(filename: &str) -> String {
    let spaced: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Artwork upload validator
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &crate::Config) -> Self {
        Self::new(
            config.max_upload_size_bytes(),
            config.allowed_extensions().to_vec(),
        )
    }

    /// Validate an upload and return the name it should be stored under.
    pub fn validate(&self, filename: &str, size: usize) -> Result<SanitizedName, ValidationError> {
        let extension = self.validate_extension(filename)?;
        self.validate_file_size(size)?;

        let (stem, _) = filename
            .rsplit_once('.')
            .ok_or_else(|| ValidationError::NoExtension(filename.to_string()))?;

        let mut stem = sanitize_filename(stem);
        if stem.is_empty() {
            stem = FALLBACK_STEM.to_string();
        }

        Ok(SanitizedName(format!("{}.{}", stem, extension)))
    }

    /// Validate file extension, returning it lowercased
    fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        let (_, extension) = filename
            .rsplit_once('.')
            .ok_or_else(|| ValidationError::NoExtension(filename.to_string()))?;

        let extension = extension.trim().to_lowercase();

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::DisallowedExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(extension)
    }

    fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }
}
