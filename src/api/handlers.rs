//! HTTP request handlers for the Tax Return Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::parse_submission;
use super::response::{ApiError, ApiErrorResponse, SubmissionResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/returns", post(submit_handler))
        .route("/returns/:document_id/form", get(retrieve_handler))
        .with_state(state)
}

/// Handler for POST /returns.
///
/// Accepts a multipart submission (1 to 3 documents plus identity fields),
/// runs the pipeline, and returns the tax return summary together with a
/// one-time handle for the rendered Form 1040.
async fn submit_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    // Correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax return submission");

    let submission = match parse_submission(multipart).await {
        Ok(submission) => submission,
        Err(response) => {
            warn!(
                correlation_id = %correlation_id,
                code = %response.error.code,
                "Rejected multipart body"
            );
            return response.into_response();
        }
    };

    // Identity is validated before anything touches the documents
    let identity = match submission.identity.validate() {
        Ok(identity) => identity,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Identity validation failed");
            let response: ApiErrorResponse = err.into();
            return response.into_response();
        }
    };

    let start_time = Instant::now();
    match state.pipeline().process(&submission.documents, &identity) {
        Ok(outcome) => {
            let document_id = state.store().put(outcome.rendered);
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                document_id = %document_id,
                documents = submission.documents.len(),
                total_income = %outcome.summary.total_income,
                estimated_tax_due = %outcome.summary.estimated_tax_due,
                duration_us = duration.as_micros(),
                "Submission completed successfully"
            );
            (
                StatusCode::OK,
                Json(SubmissionResponse {
                    document_id,
                    tax_return_summary: outcome.summary,
                }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Submission failed");
            let response: ApiErrorResponse = err.into();
            response.into_response()
        }
    }
}

/// Handler for GET /returns/{document_id}/form.
///
/// Returns the rendered Form 1040 bytes exactly once; afterwards (or after
/// expiry) the handle is invalid and the endpoint responds 404.
async fn retrieve_handler(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store().take(document_id) {
        Some(bytes) => {
            info!(document_id = %document_id, size = bytes.len(), "Document retrieved");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/pdf")],
                bytes,
            )
                .into_response()
        }
        None => {
            warn!(document_id = %document_id, "Document not found");
            let response = ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::document_not_found(document_id),
            );
            response.into_response()
        }
    }
}
