//! HTTP API module for the Tax Return Engine.
//!
//! This module provides the REST endpoints for submitting tax documents and
//! retrieving the rendered Form 1040.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, SubmissionResponse};
pub use state::AppState;
