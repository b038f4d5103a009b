//! Service wiring

use crate::services::submission::QuoteSubmissionService;
use crate::state::{AppState, SiteContext};
use anyhow::{Context, Result};
use dashprints_core::{Config, UploadValidator};
use dashprints_mail::{create_transport, DeliveryTransport, MessageComposer};
use dashprints_storage::{create_artwork_store, ArtworkStore};
use std::sync::Arc;

/// Build the artwork store and the configured delivery transport, then the state
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let store = create_artwork_store(config)
        .await
        .context("Failed to initialize artwork store")?;
    let transport = create_transport(config).context("Failed to initialize delivery transport")?;

    Ok(build_state(config, store, transport))
}

/// Assemble application state from already constructed collaborators
pub fn build_state(
    config: &Config,
    store: Arc<dyn ArtworkStore>,
    transport: Arc<dyn DeliveryTransport>,
) -> Arc<AppState> {
    let submissions = QuoteSubmissionService::new(
        UploadValidator::from_config(config),
        store,
        MessageComposer::from_config(config),
        transport,
    );

    Arc::new(AppState {
        site: SiteContext::from_config(config),
        submissions: Arc::new(submissions),
    })
}
