//! Message composition
//!
//! Builds the email sent to the business mailbox for one quote request. The
//! artwork attachment is best effort: if the stored file cannot be read the
//! message goes out without it.

use askama::Template;
use bytes::Bytes;
use dashprints_core::{Attachment, Config, OutboundMessage, QuoteRequest, StoredArtwork};
use std::path::PathBuf;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Failure to read the stored artwork back for attaching
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("Failed to read attachment {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("Failed to render email template: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "quote_email.html")]
struct QuoteEmailHtml<'a> {
    name: &'a str,
    company: &'a str,
    email: &'a str,
    phone: &'a str,
    details_lines: Vec<&'a str>,
    attachment_name: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "quote_email.txt")]
struct QuoteEmailText<'a> {
    name: &'a str,
    company: &'a str,
    email: &'a str,
    phone: &'a str,
    details: &'a str,
    attachment_name: Option<&'a str>,
}

/// Composes quote request emails addressed to the business mailbox
#[derive(Debug, Clone)]
pub struct MessageComposer {
    business_address: String,
}

impl MessageComposer {
    pub fn new(business_address: impl Into<String>) -> Self {
        Self {
            business_address: business_address.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.email_user())
    }

    /// Build the outbound message for `request`, attaching `artwork` when it can be read.
    pub async fn compose(
        &self,
        request: &QuoteRequest,
        artwork: Option<&StoredArtwork>,
    ) -> Result<OutboundMessage, ComposeError> {
        let attachment = match artwork {
            Some(stored) => match load_attachment(stored).await {
                Ok(attachment) => Some(attachment),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        submission_id = %stored.submission_id,
                        filename = %stored.name,
                        "Sending quote request without attachment"
                    );
                    None
                }
            },
            None => None,
        };

        let name = request.name.as_deref().unwrap_or("");
        let company = request.company.as_deref().unwrap_or("");
        let email = request.email.as_deref().unwrap_or("");
        let phone = request.phone.as_deref().unwrap_or("");
        let details = request.details.as_deref().unwrap_or("");
        let attachment_name = attachment.as_ref().map(|a| a.filename.as_str());

        let html_body = QuoteEmailHtml {
            name,
            company,
            email,
            phone,
            details_lines: details.lines().collect(),
            attachment_name,
        }
        .render()?;

        let text_body = QuoteEmailText {
            name,
            company,
            email,
            phone,
            details,
            attachment_name,
        }
        .render()?;

        let reply_to = request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|addr| addr.parse::<lettre::Address>().is_ok())
            .map(String::from);

        Ok(OutboundMessage {
            subject: request.subject(),
            from: self.business_address.clone(),
            to: self.business_address.clone(),
            reply_to,
            html_body,
            text_body,
            attachment,
        })
    }
}

/// Read a stored artwork file and infer its MIME type from the extension
pub async fn load_attachment(stored: &StoredArtwork) -> Result<Attachment, AttachmentError> {
    let content = tokio::fs::read(&stored.path)
        .await
        .map_err(|source| AttachmentError::Read {
            path: stored.path.clone(),
            source,
        })?;

    let content_type = mime_guess::from_path(stored.name.as_str())
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

    Ok(Attachment {
        filename: stored.name.to_string(),
        content_type,
        content: Bytes::from(content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashprints_core::SanitizedName;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn jane() -> QuoteRequest {
        QuoteRequest {
            name: Some("Jane".to_string()),
            company: Some("Acme".to_string()),
            email: Some("jane@acme.test".to_string()),
            phone: Some("555-0100".to_string()),
            details: Some("50 shirts\nTwo colors".to_string()),
        }
    }

    fn stored_at(path: PathBuf, name: &str) -> StoredArtwork {
        StoredArtwork {
            submission_id: Uuid::new_v4(),
            name: SanitizedName::new(name).unwrap(),
            path,
            size_bytes: 0,
        }
    }

    #[tokio::test]
    async fn test_compose_without_artwork() {
        let composer = MessageComposer::new("owner@dashprints.test");
        let message = composer.compose(&jane(), None).await.unwrap();

        assert_eq!(message.subject, "New Quote Request from Jane – Acme");
        assert_eq!(message.from, "owner@dashprints.test");
        assert_eq!(message.to, "owner@dashprints.test");
        assert_eq!(message.reply_to.as_deref(), Some("jane@acme.test"));
        assert!(message.attachment.is_none());
        assert!(message.html_body.contains("<strong>Name:</strong> Jane"));
        assert!(message.html_body.contains("50 shirts<br>Two colors"));
        assert!(message.text_body.contains("50 shirts\nTwo colors"));
        assert!(message.text_body.contains("Phone: 555-0100"));
    }

    #[tokio::test]
    async fn test_compose_attaches_stored_artwork() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logo.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let composer = MessageComposer::new("owner@dashprints.test");
        let message = composer
            .compose(&jane(), Some(&stored_at(path, "logo.png")))
            .await
            .unwrap();

        let attachment = message.attachment.unwrap();
        assert_eq!(attachment.filename, "logo.png");
        assert_eq!(attachment.content_type, "image/png");
        assert_eq!(attachment.content.as_ref(), &[0x89, b'P', b'N', b'G']);
        assert!(message.text_body.contains("Artwork: logo.png"));
    }

    #[tokio::test]
    async fn test_unreadable_artwork_is_dropped() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone.png");
        let composer = MessageComposer::new("owner@dashprints.test");

        let without = composer.compose(&jane(), None).await.unwrap();
        let degraded = composer
            .compose(&jane(), Some(&stored_at(missing, "gone.png")))
            .await
            .unwrap();

        assert!(degraded.attachment.is_none());
        assert_eq!(degraded, without);
    }

    #[tokio::test]
    async fn test_unknown_extension_falls_back_to_octet_stream() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("artwork.zzq");
        std::fs::write(&path, b"data").unwrap();

        let attachment = load_attachment(&stored_at(path, "artwork.zzq")).await.unwrap();
        assert_eq!(attachment.content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_html_body_escapes_user_input() {
        let request = QuoteRequest {
            name: Some("<script>alert(1)</script>".to_string()),
            details: Some("<b>bold</b>".to_string()),
            ..Default::default()
        };
        let message = MessageComposer::new("owner@dashprints.test")
            .compose(&request, None)
            .await
            .unwrap();

        assert!(!message.html_body.contains("<script>"));
        assert!(message.html_body.contains("&lt;script&gt;"));
        assert!(message.html_body.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(message.text_body.contains("<b>bold</b>"));
    }

    #[tokio::test]
    async fn test_invalid_submitter_email_has_no_reply_to() {
        let request = QuoteRequest {
            email: Some("not an address".to_string()),
            ..Default::default()
        };
        let message = MessageComposer::new("owner@dashprints.test")
            .compose(&request, None)
            .await
            .unwrap();

        assert!(message.reply_to.is_none());
        assert_eq!(message.subject, "New Quote Request from");
    }
}
