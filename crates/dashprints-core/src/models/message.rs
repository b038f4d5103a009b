use bytes::Bytes;

/// A file attached to an outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: Bytes,
}

/// A composed email, ready for a delivery transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub subject: String,
    pub from: String,
    pub to: String,
    /// Submitter address, when it looks like one
    pub reply_to: Option<String>,
    pub html_body: String,
    pub text_body: String,
    pub attachment: Option<Attachment>,
}

impl OutboundMessage {
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }
}
