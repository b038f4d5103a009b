//! SendGrid v3 mail send transport

use anyhow::Context;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dashprints_core::{Config, DeliveryResult, OutboundMessage};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::DeliveryTransport;

#[derive(Debug, Serialize)]
struct SendGridRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: EmailAddress<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<EmailAddress<'a>>,
    content: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<SendGridAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<EmailAddress<'a>>,
    subject: &'a str,
}

#[derive(Debug, Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct SendGridAttachment<'a> {
    content: String,
    filename: &'a str,
    #[serde(rename = "type")]
    content_type: &'a str,
    disposition: &'static str,
}

impl<'a> SendGridRequest<'a> {
    fn from_message(message: &'a OutboundMessage) -> Self {
        SendGridRequest {
            personalizations: vec![Personalization {
                to: vec![EmailAddress { email: &message.to }],
                subject: &message.subject,
            }],
            from: EmailAddress {
                email: &message.from,
            },
            reply_to: message
                .reply_to
                .as_deref()
                .map(|email| EmailAddress { email }),
            content: vec![
                Content {
                    content_type: "text/plain",
                    value: &message.text_body,
                },
                Content {
                    content_type: "text/html",
                    value: &message.html_body,
                },
            ],
            attachments: message
                .attachment
                .iter()
                .map(|a| SendGridAttachment {
                    content: STANDARD.encode(&a.content),
                    filename: &a.filename,
                    content_type: &a.content_type,
                    disposition: "attachment",
                })
                .collect(),
        }
    }
}

/// Delivers through the SendGrid HTTPS API with a bearer key
pub struct SendGridTransport {
    http_client: Client,
    api_key: Option<String>,
    api_url: String,
}

impl SendGridTransport {
    pub fn new(
        api_key: Option<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for SendGrid")?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let delivery = config.delivery();
        Self::new(
            delivery.sendgrid_api_key.clone(),
            delivery.sendgrid_api_url.clone(),
            Duration::from_secs(delivery.sendgrid_timeout_secs),
        )
    }
}

#[async_trait]
impl DeliveryTransport for SendGridTransport {
    async fn send(&self, message: &OutboundMessage) -> DeliveryResult {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("SENDGRID_API_KEY is not set; quote request not sent");
            return DeliveryResult::TransportNotConfigured;
        };

        let payload = SendGridRequest::from_message(message);
        let start = std::time::Instant::now();

        let response = match self
            .http_client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "SendGrid request failed");
                return DeliveryResult::TransportFailed(format!("SendGrid request failed: {}", e));
            }
        };

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                body = %error_text,
                "SendGrid rejected quote request email"
            );
            return DeliveryResult::TransportFailed(format!(
                "SendGrid returned status {}",
                status.as_u16()
            ));
        }

        tracing::info!(
            status = status.as_u16(),
            attachment = message.has_attachment(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Quote request email sent via SendGrid"
        );

        DeliveryResult::Sent
    }

    fn name(&self) -> &'static str {
        "sendgrid"
    }
}
