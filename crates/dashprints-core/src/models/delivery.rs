use std::fmt;

/// Outcome of a single delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    Sent,
    /// The active transport has no credential; nothing was sent over the network.
    TransportNotConfigured,
    /// The attempt failed. The reason is for operator logs only.
    TransportFailed(String),
}

impl DeliveryResult {
    /// Short label for log fields
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryResult::Sent => "sent",
            DeliveryResult::TransportNotConfigured => "not_configured",
            DeliveryResult::TransportFailed(_) => "failed",
        }
    }
}

impl fmt::Display for DeliveryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryResult::Sent => write!(f, "sent"),
            DeliveryResult::TransportNotConfigured => write!(f, "transport not configured"),
            DeliveryResult::TransportFailed(reason) => write!(f, "transport failed: {}", reason),
        }
    }
}
