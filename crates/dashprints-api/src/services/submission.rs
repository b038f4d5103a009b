//! Quote submission pipeline
//!
//! One submission runs validate, store, compose, deliver in order and ends in
//! exactly one [`SubmissionOutcome`]. Nothing is retried and nothing continues
//! after the response is produced.

use dashprints_core::{
    AppError, DeliveryResult, QuoteRequest, StoredArtwork, UploadValidator, UploadedArtwork,
    ValidationError,
};
use dashprints_mail::{DeliveryTransport, MessageComposer};
use dashprints_storage::ArtworkStore;
use std::sync::Arc;
use uuid::Uuid;

/// Everything read from one form post
#[derive(Debug, Clone, Default)]
pub struct QuoteSubmission {
    pub request: QuoteRequest,
    pub artwork: Option<UploadedArtwork>,
}

/// Terminal state of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The artwork file failed validation; nothing was stored or sent.
    Rejected(ValidationError),
    Sent,
    NotConfigured,
    TransportFailed(String),
}

impl From<DeliveryResult> for SubmissionOutcome {
    fn from(result: DeliveryResult) -> Self {
        match result {
            DeliveryResult::Sent => SubmissionOutcome::Sent,
            DeliveryResult::TransportNotConfigured => SubmissionOutcome::NotConfigured,
            DeliveryResult::TransportFailed(reason) => SubmissionOutcome::TransportFailed(reason),
        }
    }
}

impl SubmissionOutcome {
    /// Map failures to the error rendered for them
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            SubmissionOutcome::Sent => Ok(()),
            SubmissionOutcome::Rejected(rejection) => Err(AppError::Validation(rejection)),
            SubmissionOutcome::NotConfigured => Err(AppError::NotConfigured(
                "delivery credential is not set".to_string(),
            )),
            SubmissionOutcome::TransportFailed(reason) => Err(AppError::Transport(reason)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionReport {
    pub submission_id: Uuid,
    pub outcome: SubmissionOutcome,
    pub stored: Option<StoredArtwork>,
}

pub struct QuoteSubmissionService {
    validator: UploadValidator,
    store: Arc<dyn ArtworkStore>,
    composer: MessageComposer,
    transport: Arc<dyn DeliveryTransport>,
}

impl QuoteSubmissionService {
    pub fn new(
        validator: UploadValidator,
        store: Arc<dyn ArtworkStore>,
        composer: MessageComposer,
        transport: Arc<dyn DeliveryTransport>,
    ) -> Self {
        Self {
            validator,
            store,
            composer,
            transport,
        }
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Run one submission to completion.
    ///
    /// Only a storage or template failure is returned as an error; every other
    /// ending is a [`SubmissionOutcome`].
    #[tracing::instrument(
        skip(self, submission),
        fields(
            submission_id = tracing::field::Empty,
            has_artwork = submission.artwork.is_some(),
            transport = self.transport.name()
        )
    )]
    pub async fn submit(&self, submission: QuoteSubmission) -> Result<SubmissionReport, AppError> {
        let submission_id = Uuid::new_v4();
        tracing::Span::current().record("submission_id", tracing::field::display(submission_id));

        let stored = match submission.artwork {
            Some(artwork) => {
                let size = artwork.size();
                let name = match self.validator.validate(&artwork.original_filename, size) {
                    Ok(name) => name,
                    Err(rejection) => {
                        tracing::info!(
                            filename = %artwork.original_filename,
                            size_bytes = size,
                            reason = %rejection,
                            "Artwork rejected"
                        );
                        return Ok(SubmissionReport {
                            submission_id,
                            outcome: SubmissionOutcome::Rejected(rejection),
                            stored: None,
                        });
                    }
                };

                let stored = self
                    .store
                    .store(submission_id, &name, artwork.content)
                    .await
                    .map_err(|e| AppError::Storage(e.to_string()))?;
                Some(stored)
            }
            None => None,
        };

        let message = self
            .composer
            .compose(&submission.request, stored.as_ref())
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let start = std::time::Instant::now();
        let result = self.transport.send(&message).await;

        tracing::info!(
            status = result.label(),
            attachment = message.has_attachment(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Quote request processed"
        );

        Ok(SubmissionReport {
            submission_id,
            outcome: result.into(),
            stored,
        })
    }
}
