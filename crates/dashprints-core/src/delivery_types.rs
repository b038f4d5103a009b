use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Delivery backend types
///
/// Exactly one backend is active per deployment; it is selected once at startup
/// from `EMAIL_TRANSPORT` and never swapped at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryBackend {
    SendGrid,
    Smtp,
}

impl FromStr for DeliveryBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sendgrid" | "api" => Ok(DeliveryBackend::SendGrid),
            "smtp" => Ok(DeliveryBackend::Smtp),
            _ => Err(anyhow::anyhow!("Invalid email transport: {}", s)),
        }
    }
}

impl Display for DeliveryBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DeliveryBackend::SendGrid => write!(f, "sendgrid"),
            DeliveryBackend::Smtp => write!(f, "smtp"),
        }
    }
}
