//! Dash Prints Storage Library
//!
//! This crate persists accepted artwork uploads. It includes the `ArtworkStore`
//! trait and a local filesystem implementation.
//!
//! # Storage key format
//!
//! Every submission gets its own directory, so two uploads with the same
//! sanitized name never share a path:
//!
//! - `{submission_id}/{sanitized_name}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation lives in the
//! `keys` module.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_artwork_store;
pub use local::LocalArtworkStore;
pub use traits::{ArtworkStore, StorageError, StorageResult};
