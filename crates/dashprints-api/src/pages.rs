//! HTML response pages
//!
//! Every response to a form post is one of these pages. They share
//! `templates/base.html` and are never cached.

use askama::Template;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};

#[derive(Template)]
#[template(path = "pages/thank_you.html")]
struct ThankYouTemplate;

#[derive(Template)]
#[template(path = "pages/file_type_rejected.html")]
struct FileTypeRejectedTemplate<'a> {
    allowed: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "pages/file_too_large.html")]
struct FileTooLargeTemplate {
    max_mb: Option<usize>,
}

#[derive(Template)]
#[template(path = "pages/config_error.html")]
struct ConfigErrorTemplate<'a> {
    contact: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "pages/transport_error.html")]
struct TransportErrorTemplate<'a> {
    contact: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "pages/error.html")]
struct ErrorTemplate<'a> {
    message: &'a str,
    suggested_action: Option<&'a str>,
    details: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    ThankYou,
    FileTypeRejected {
        /// Human readable list, e.g. `PNG, JPG, or JPEG`
        allowed: Option<String>,
    },
    FileTooLarge {
        max_mb: Option<usize>,
    },
    ConfigError {
        contact: Option<String>,
    },
    TransportError {
        contact: Option<String>,
    },
    Error {
        message: String,
        suggested_action: Option<String>,
        details: Option<String>,
    },
}

impl Page {
    pub fn render(&self) -> Result<String, askama::Error> {
        match self {
            Page::ThankYou => ThankYouTemplate.render(),
            Page::FileTypeRejected { allowed } => FileTypeRejectedTemplate {
                allowed: allowed.as_deref(),
            }
            .render(),
            Page::FileTooLarge { max_mb } => FileTooLargeTemplate { max_mb: *max_mb }.render(),
            Page::ConfigError { contact } => ConfigErrorTemplate {
                contact: contact.as_deref(),
            }
            .render(),
            Page::TransportError { contact } => TransportErrorTemplate {
                contact: contact.as_deref(),
            }
            .render(),
            Page::Error {
                message,
                suggested_action,
                details,
            } => ErrorTemplate {
                message,
                suggested_action: suggested_action.as_deref(),
                details: details.as_deref(),
            }
            .render(),
        }
    }

    /// Render with an explicit status code
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        match self.render() {
            Ok(body) => {
                let mut response = (status, Html(body)).into_response();
                response
                    .headers_mut()
                    .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
                response
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to render page");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        self.into_response_with_status(StatusCode::OK)
    }
}

/// Format extensions for display: `["png", "jpg", "jpeg"]` becomes `PNG, JPG, or JPEG`.
pub fn human_extension_list(extensions: &[String]) -> String {
    let upper: Vec<String> = extensions.iter().map(|e| e.to_uppercase()).collect();
    match upper.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{} or {}", first, second),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    }
}
