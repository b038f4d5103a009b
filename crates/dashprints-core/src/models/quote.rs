use serde::{Deserialize, Serialize};

const SUBJECT_PREFIX: &str = "New Quote Request from";
const SUBJECT_SEPARATOR: &str = " – ";

/// Contact details submitted through the quote form.
///
/// Every field is optional free text. Whitespace-only values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub details: Option<String>,
}

impl QuoteRequest {
    /// Whether `field` names one of the quote form's text fields
    pub fn is_field(field: &str) -> bool {
        matches!(
            field,
            "name" | "company" | "email" | "phone" | "project_details" | "details"
        )
    }

    /// Set a form field by its form name. Returns `false` for unknown fields.
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "company" => &mut self.company,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "project_details" | "details" => &mut self.details,
            _ => return false,
        };
        *slot = normalize(value);
        true
    }

    /// Email subject, e.g. `New Quote Request from Jane – Acme`
    pub fn subject(&self) -> String {
        let parts: Vec<&str> = [self.name.as_deref(), self.company.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        format!("{} {}", SUBJECT_PREFIX, parts.join(SUBJECT_SEPARATOR))
            .trim_end()
            .to_string()
    }
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
