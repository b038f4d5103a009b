use crate::transport::{DeliveryTransport, SendGridTransport, SmtpTransport};
use dashprints_core::{Config, DeliveryBackend};
use std::sync::Arc;

/// Create the delivery transport selected by `EMAIL_TRANSPORT`.
///
/// A missing credential is not an error here; the transport reports
/// `TransportNotConfigured` on each send instead.
pub fn create_transport(config: &Config) -> anyhow::Result<Arc<dyn DeliveryTransport>> {
    let transport: Arc<dyn DeliveryTransport> = match config.delivery_backend() {
        DeliveryBackend::SendGrid => {
            if config.delivery().sendgrid_api_key.is_none() {
                tracing::warn!("SENDGRID_API_KEY is not set; quote requests will not be delivered");
            }
            Arc::new(SendGridTransport::from_config(config)?)
        }
        DeliveryBackend::Smtp => Arc::new(SmtpTransport::from_config(config)?),
    };

    tracing::info!(transport = transport.name(), "Delivery transport selected");
    Ok(transport)
}
