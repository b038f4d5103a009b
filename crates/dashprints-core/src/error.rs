//! Error types module
//!
//! `AppError` is the error the HTTP layer renders. Each variant describes its own
//! status code, machine code, and log level through [`ErrorMetadata`], so the
//! page renderer and the request logger treat every failure the same way.

use crate::validation::ValidationError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like rejected uploads
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Suggested action for the submitter
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Upload rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Delivery transport not configured: {0}")]
    NotConfigured(String),

    #[error("Delivery failed: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (u16, &'static str, Option<&'static str>, bool, LogLevel) {
    match err {
        AppError::Validation(ValidationError::FileTooLarge { .. }) | AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            Some("Reduce the file size and submit again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Validation(_) => (
            415,
            "UNSUPPORTED_FILE_TYPE",
            Some("Upload a PNG or JPG file and submit again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotConfigured(_) => (
            503,
            "TRANSPORT_NOT_CONFIGURED",
            Some("Contact us directly by email"),
            true,
            LogLevel::Error,
        ),
        AppError::Transport(_) => (
            502,
            "TRANSPORT_FAILED",
            Some("Retry in a few minutes or contact us directly"),
            true,
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::BadRequest(_) => (
            400,
            "BAD_REQUEST",
            Some("Check the form and submit again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::NotConfigured(_) => "NotConfigured",
            AppError::Transport(_) => "Transport",
            AppError::Storage(_) => "Storage",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(ValidationError::FileTooLarge { max, .. }) => format!(
                "File too large. The maximum upload size is {} MB.",
                max / (1024 * 1024)
            ),
            AppError::Validation(_) => "File type not allowed".to_string(),
            AppError::NotConfigured(_) => "Email service is not configured correctly.".to_string(),
            AppError::Transport(_) => {
                "We weren't able to send your request by email.".to_string()
            }
            AppError::Storage(_) => "Failed to save the uploaded file".to_string(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_unsupported_type() {
        let err = AppError::from(ValidationError::DisallowedExtension {
            extension: "exe".to_string(),
            allowed: vec!["png".to_string()],
        });
        assert_eq!(err.http_status_code(), 415);
        assert_eq!(err.error_code(), "UNSUPPORTED_FILE_TYPE");
        assert_eq!(err.client_message(), "File type not allowed");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_file_too_large_maps_to_413() {
        let err = AppError::from(ValidationError::FileTooLarge {
            size: 11 * 1024 * 1024,
            max: 10 * 1024 * 1024,
        });
        assert_eq!(err.http_status_code(), 413);
        assert!(err.client_message().contains("10 MB"));
    }

    #[test]
    fn test_delivery_errors_are_sensitive() {
        let not_configured = AppError::NotConfigured("SENDGRID_API_KEY is not set".to_string());
        assert_eq!(not_configured.http_status_code(), 503);
        assert!(not_configured.is_sensitive());
        assert!(!not_configured.client_message().contains("SENDGRID"));

        let transport = AppError::Transport("status 401".to_string());
        assert_eq!(transport.http_status_code(), 502);
        assert_eq!(transport.log_level(), LogLevel::Error);
        assert!(!transport.client_message().contains("401"));
    }

    #[test]
    fn test_detailed_message_includes_cause() {
        let err = AppError::from(ValidationError::NoExtension("logo".to_string()));
        assert_eq!(err.error_type(), "Validation");
        assert!(err.detailed_message().contains("Caused by"));
    }

    #[test]
    fn test_internal_error_hides_message() {
        let err = AppError::Internal("template missing".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(err.client_message(), "Internal server error");
    }
}
