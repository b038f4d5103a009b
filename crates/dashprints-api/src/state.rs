//! Application state shared by all handlers.

use crate::services::submission::QuoteSubmissionService;
use dashprints_core::Config;
use std::sync::Arc;

/// The parts of configuration that response pages need
#[derive(Debug, Clone)]
pub struct SiteContext {
    /// Address shown on error pages for direct contact
    pub contact_email: String,
    pub max_upload_mb: usize,
    pub allowed_extensions: Vec<String>,
    pub is_production: bool,
}

impl SiteContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            contact_email: config.email_user().to_string(),
            max_upload_mb: config.max_upload_size_bytes() / 1024 / 1024,
            allowed_extensions: config.allowed_extensions().to_vec(),
            is_production: config.is_production(),
        }
    }
}

pub struct AppState {
    pub site: SiteContext,
    pub submissions: Arc<QuoteSubmissionService>,
}
