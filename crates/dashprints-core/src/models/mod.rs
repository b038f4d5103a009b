//! Domain models

pub mod artwork;
pub mod delivery;
pub mod message;
pub mod quote;

pub use artwork::{StoredArtwork, UploadedArtwork};
pub use delivery::DeliveryResult;
pub use message::{Attachment, OutboundMessage};
pub use quote::QuoteRequest;
