//! HTTP error response conversion
//!
//! Renders an `AppError` as one of the HTML pages in [`crate::pages`], with the
//! status code from its [`ErrorMetadata`].
//!
//! **Handler pattern:** return `Result<Page, HttpAppError>` and build the error
//! with [`HttpAppError::new`] and the request's [`SiteContext`], so error pages
//! can show the contact address and upload limits.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dashprints_core::{AppError, ErrorMetadata, LogLevel, ValidationError};

use crate::pages::{human_extension_list, Page};
use crate::state::SiteContext;

/// An `AppError` paired with the site context its page needs
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    site: SiteContext,
}

impl HttpAppError {
    pub fn new(error: AppError, site: &SiteContext) -> Self {
        Self {
            error,
            site: site.clone(),
        }
    }
}

/// Error for a request whose body is not a readable multipart form
pub fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    AppError::BadRequest(format!(
        "Invalid form submission: {}",
        rejection.body_text()
    ))
}

/// Error for a multipart body that failed part way through
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Request body too large: {}", err.body_text()))
    } else {
        AppError::BadRequest(format!("Failed to read form data: {}", err.body_text()))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, error_code, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, error_code, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type, error_code, "Error occurred");
        }
    }
}

/// Choose the page for an error
pub fn page_for_error(error: &AppError, site: &SiteContext) -> Page {
    let contact = Some(site.contact_email.clone());

    match error {
        AppError::Validation(ValidationError::FileTooLarge { max, .. }) => Page::FileTooLarge {
            max_mb: Some(max / 1024 / 1024),
        },
        AppError::PayloadTooLarge(_) => Page::FileTooLarge {
            max_mb: Some(site.max_upload_mb),
        },
        AppError::Validation(_) => Page::FileTypeRejected {
            allowed: Some(human_extension_list(&site.allowed_extensions)),
        },
        AppError::NotConfigured(_) => Page::ConfigError { contact },
        AppError::Transport(_) => Page::TransportError { contact },
        _ => Page::Error {
            message: error.client_message(),
            suggested_action: error.suggested_action().map(String::from),
            // Hide details in production and for sensitive errors
            details: if site.is_production || error.is_sensitive() {
                None
            } else {
                Some(error.detailed_message())
            },
        },
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        page_for_error(app_error, &self.site)
            .into_response_with_status(status)
    }
}
