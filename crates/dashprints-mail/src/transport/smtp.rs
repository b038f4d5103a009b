//! SMTP transport (STARTTLS relay with username/password)

use async_trait::async_trait;
use dashprints_core::{Config, DeliveryResult, OutboundMessage};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

use super::DeliveryTransport;

/// Delivers through an authenticated SMTP relay.
///
/// Without a password the transport is built but every send reports
/// `TransportNotConfigured`.
pub struct SmtpTransport {
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
    host: String,
    port: u16,
}

impl SmtpTransport {
    pub fn new(
        host: &str,
        port: u16,
        user: &str,
        password: Option<&str>,
        tls: bool,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mailer = match password {
            Some(password) => {
                let credentials = Credentials::new(user.to_string(), password.to_string());
                let mailer = if tls {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
                        .port(port)
                        .credentials(credentials)
                        .timeout(Some(timeout))
                        .build()
                } else {
                    AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                        .port(port)
                        .credentials(credentials)
                        .timeout(Some(timeout))
                        .build()
                };
                tracing::info!(
                    host = %host,
                    port = port,
                    tls = tls,
                    "SMTP transport initialized"
                );
                Some(mailer)
            }
            None => {
                tracing::warn!(
                    host = %host,
                    "SMTP_PASSWORD is not set; quote requests will not be delivered"
                );
                None
            }
        };

        Ok(Self {
            mailer,
            host: host.to_string(),
            port,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let delivery = config.delivery();
        Self::new(
            &delivery.smtp_host,
            delivery.smtp_port,
            &delivery.smtp_user,
            delivery.smtp_password.as_deref(),
            delivery.smtp_tls,
            Duration::from_secs(delivery.smtp_timeout_secs),
        )
    }
}

/// Build the MIME message: text and HTML alternatives, wrapped with the attachment if any.
pub fn build_message(message: &OutboundMessage) -> Result<Message, String> {
    let from: Mailbox = message
        .from
        .parse()
        .map_err(|e| format!("invalid from address '{}': {}", message.from, e))?;
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|e| format!("invalid to address '{}': {}", message.to, e))?;

    let mut builder = Message::builder()
        .from(from)
        .to(to)
        .subject(&message.subject);

    if let Some(reply_to) = message.reply_to.as_deref() {
        if let Ok(mbox) = reply_to.parse::<Mailbox>() {
            builder = builder.reply_to(mbox);
        }
    }

    let alternative = MultiPart::alternative()
        .singlepart(SinglePart::plain(message.text_body.clone()))
        .singlepart(SinglePart::html(message.html_body.clone()));

    let email = match &message.attachment {
        Some(attachment) => {
            let content_type = match ContentType::parse(&attachment.content_type) {
                Ok(content_type) => content_type,
                Err(_) => ContentType::parse("application/octet-stream")
                    .map_err(|e| format!("invalid attachment type: {}", e))?,
            };
            let mixed = MultiPart::mixed().multipart(alternative).singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.content.to_vec(), content_type),
            );
            builder.multipart(mixed)
        }
        None => builder.multipart(alternative),
    };

    email.map_err(|e| format!("failed to build message: {}", e))
}

#[async_trait]
impl DeliveryTransport for SmtpTransport {
    async fn send(&self, message: &OutboundMessage) -> DeliveryResult {
        let Some(mailer) = self.mailer.as_ref() else {
            tracing::error!("SMTP_PASSWORD is not set; quote request not sent");
            return DeliveryResult::TransportNotConfigured;
        };

        let email = match build_message(message) {
            Ok(email) => email,
            Err(reason) => {
                tracing::error!(error = %reason, "Failed to build SMTP message");
                return DeliveryResult::TransportFailed(reason);
            }
        };

        let start = std::time::Instant::now();
        match mailer.send(email).await {
            Ok(response) => {
                tracing::info!(
                    host = %self.host,
                    port = self.port,
                    code = %response.code(),
                    attachment = message.has_attachment(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Quote request email sent via SMTP"
                );
                DeliveryResult::Sent
            }
            Err(e) => {
                tracing::error!(
                    host = %self.host,
                    port = self.port,
                    error = %e,
                    "SMTP delivery failed"
                );
                DeliveryResult::TransportFailed(format!("SMTP delivery failed: {}", e))
            }
        }
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use dashprints_core::Attachment as MessageAttachment;

    fn message() -> OutboundMessage {
        OutboundMessage {
            subject: "New Quote Request from Jane – Acme".to_string(),
            from: "owner@dashprints.test".to_string(),
            to: "owner@dashprints.test".to_string(),
            reply_to: Some("jane@acme.test".to_string()),
            html_body: "<p>hello</p>".to_string(),
            text_body: "hello".to_string(),
            attachment: None,
        }
    }

    fn formatted(message: &OutboundMessage) -> String {
        String::from_utf8(build_message(message).unwrap().formatted()).unwrap()
    }

    #[test]
    fn test_build_message_is_alternative_without_attachment() {
        let raw = formatted(&message());
        assert!(raw.contains("multipart/alternative"));
        assert!(!raw.contains("multipart/mixed"));
        assert!(raw.contains("Reply-To: jane@acme.test"));
    }

    #[test]
    fn test_build_message_wraps_attachment_in_mixed() {
        let mut msg = message();
        msg.attachment = Some(MessageAttachment {
            filename: "logo.png".to_string(),
            content_type: "image/png".to_string(),
            content: Bytes::from_static(b"png-bytes"),
        });
        let raw = formatted(&msg);
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("filename=\"logo.png\""));
        assert!(raw.contains("image/png"));
    }

    #[test]
    fn test_build_message_rejects_bad_sender() {
        let mut msg = message();
        msg.from = "nobody".to_string();
        assert!(build_message(&msg).is_err());
    }

    #[tokio::test]
    async fn test_missing_password_is_not_configured() {
        let transport = SmtpTransport::new(
            "smtp.example.test",
            587,
            "owner@dashprints.test",
            None,
            true,
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(
            transport.send(&message()).await,
            DeliveryResult::TransportNotConfigured
        );
        assert_eq!(transport.name(), "smtp");
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_transport_failure() {
        let transport = SmtpTransport::new(
            "127.0.0.1",
            9,
            "owner@dashprints.test",
            Some("secret"),
            false,
            Duration::from_secs(2),
        )
        .unwrap();

        assert!(matches!(
            transport.send(&message()).await,
            DeliveryResult::TransportFailed(_)
        ));
    }
}
