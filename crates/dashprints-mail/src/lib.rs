//! Dash Prints Mail Library
//!
//! Turns a quote request into an [`OutboundMessage`](dashprints_core::OutboundMessage)
//! and delivers it through one of two transports: the SendGrid HTTPS API or
//! authenticated SMTP. The transport is picked once from configuration.

pub mod composer;
pub mod factory;
pub mod transport;

pub use composer::{AttachmentError, ComposeError, MessageComposer};
pub use factory::create_transport;
pub use transport::{DeliveryTransport, SendGridTransport, SmtpTransport};
