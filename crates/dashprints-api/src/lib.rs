//! Dash Prints API Library
//!
//! This crate provides the HTTP surface of the site: static pages, the quote
//! submission handler and its orchestration service, and application setup.

mod handlers;
mod middleware;
pub mod pages;
pub mod services;
pub mod setup;
mod telemetry;

pub mod error;
pub mod state;

pub use error::HttpAppError;
pub use services::submission::{QuoteSubmission, QuoteSubmissionService, SubmissionOutcome};
