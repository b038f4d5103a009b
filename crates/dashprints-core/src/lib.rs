//! Dash Prints Core Library
//!
//! This crate provides the domain models, error types, configuration, and upload
//! validation shared by the storage, mail, and API crates.

pub mod config;
pub mod delivery_types;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, DeliveryConfig, SiteConfig};
pub use delivery_types::DeliveryBackend;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    Attachment, DeliveryResult, OutboundMessage, QuoteRequest, StoredArtwork, UploadedArtwork,
};
pub use validation::{sanitize_filename, SanitizedName, UploadValidator, ValidationError};
