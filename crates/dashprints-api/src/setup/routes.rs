//! Route configuration and setup

use crate::handlers;
use crate::middleware::security_headers::{security_headers_middleware, SecurityHeadersConfig};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use dashprints_core::Config;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let static_dir = config.static_dir();

    let security_headers_config = Arc::new(SecurityHeadersConfig::new(config.is_production()));

    tracing::info!(
        static_dir = %static_dir.display(),
        max_upload_bytes = config.max_upload_size_bytes(),
        "Routes configured"
    );

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/style.css", ServeFile::new(static_dir.join("style.css")))
        .route_service("/favicon.ico", ServeFile::new(config.favicon_path()))
        .nest_service("/images", ServeDir::new(static_dir.join("images")))
        .route("/submit", post(handlers::quote::submit_quote))
        .route("/health", get(handlers::health::liveness_check))
        // The configured cap is the only body limit
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes()))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ))
        .with_state(state)
}
