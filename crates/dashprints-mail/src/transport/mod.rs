//! Delivery transports
//!
//! Each transport makes exactly one attempt per message and reports the outcome
//! as a [`DeliveryResult`]. Failures are values, not errors: the caller maps
//! them to a response page.

use async_trait::async_trait;
use dashprints_core::{DeliveryResult, OutboundMessage};

pub mod sendgrid;
pub mod smtp;

pub use sendgrid::SendGridTransport;
pub use smtp::SmtpTransport;

#[async_trait]
pub trait DeliveryTransport: Send + Sync {
    /// Attempt a single delivery of `message`.
    async fn send(&self, message: &OutboundMessage) -> DeliveryResult;

    /// Transport name for logs and health output
    fn name(&self) -> &'static str;
}
