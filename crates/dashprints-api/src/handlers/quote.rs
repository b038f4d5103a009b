use std::sync::Arc;

use axum::extract::{
    multipart::{Multipart, MultipartRejection},
    State,
};
use dashprints_core::{AppError, QuoteRequest, UploadedArtwork};

use crate::error::{multipart_error, multipart_rejection, HttpAppError};
use crate::pages::Page;
use crate::services::submission::QuoteSubmission;
use crate::state::AppState;

/// Form field carrying the artwork file
const ARTWORK_FIELD: &str = "artwork_file";

/// Quote form handler
///
/// Reads the multipart form, runs the submission pipeline, and renders the
/// thank-you page or the page for whatever stopped the pipeline.
#[tracing::instrument(skip(state, multipart), fields(operation = "submit_quote"))]
pub async fn submit_quote(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Page, HttpAppError> {
    let to_http = |e: AppError| HttpAppError::new(e, &state.site);

    let multipart = multipart.map_err(|e| to_http(multipart_rejection(e)))?;
    let submission = read_submission(multipart).await.map_err(to_http)?;

    let report = state
        .submissions
        .submit(submission)
        .await
        .map_err(to_http)?;

    report.outcome.into_result().map_err(to_http)?;

    Ok(Page::ThankYou)
}

/// Collect text fields and the optional artwork file from the form.
///
/// A file part with an empty filename means no file was chosen. Unknown fields
/// are skipped without reading their contents.
async fn read_submission(mut multipart: Multipart) -> Result<QuoteSubmission, AppError> {
    let mut submission = QuoteSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == ARTWORK_FIELD {
            let filename = field
                .file_name()
                .map(|s| s.to_string())
                .filter(|s| !s.trim().is_empty());
            let content_type = field.content_type().map(|s| s.to_string());
            let content = field.bytes().await.map_err(multipart_error)?;

            if let Some(original_filename) = filename {
                submission.artwork = Some(UploadedArtwork {
                    original_filename,
                    content,
                    content_type,
                });
            }
            continue;
        }

        if !QuoteRequest::is_field(&field_name) {
            tracing::debug!(field = %field_name, "Ignoring unknown form field");
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        submission.request.set_field(&field_name, &value);
    }

    Ok(submission)
}
