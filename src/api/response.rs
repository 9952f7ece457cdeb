//! Response types for the Tax Return Engine API.
//!
//! This module defines the success and error response structures and the
//! mapping from engine errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::TaxReturnSummary;

/// Successful submission response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    /// One-time handle for retrieving the rendered Form 1040.
    pub document_id: Uuid,
    /// The computed tax return summary.
    pub tax_return_summary: TaxReturnSummary,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed multipart body error response.
    pub fn malformed_multipart(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_MULTIPART", message)
    }

    /// Creates the response for an unknown or spent document handle.
    pub fn document_not_found(id: Uuid) -> Self {
        Self::with_details(
            "DOCUMENT_NOT_FOUND",
            format!("No document for id {}", id),
            "The document was already retrieved, expired, or never existed",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response with the given status and body.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidPolicyTable { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "INVALID_POLICY_TABLE",
                    "Tax policy configuration is invalid",
                    message,
                ),
            },
            EngineError::UnsupportedFilingStatus { status, tax_year } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNSUPPORTED_FILING_STATUS",
                    format!(
                        "Filing status '{}' is not supported for tax year {}",
                        status, tax_year
                    ),
                    "This is a limitation of the engine, not a problem with the submitted data",
                ),
            },
            EngineError::InvalidAmount { field, value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_AMOUNT",
                    format!("Invalid amount in field '{}'", field),
                    format!("Could not parse '{}' as a monetary amount", value),
                ),
            },
            EngineError::InvalidIdentity { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid identity field '{}': {}", field, message),
                    "The filer identity contains invalid information",
                ),
            },
            EngineError::InvalidDocumentCount { count } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(format!(
                    "Expected between 1 and 3 documents, got {}",
                    count
                )),
            },
            EngineError::InvalidFormData { issues } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_FORM_DATA",
                    "Extracted form data failed validation",
                    issues
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; "),
                ),
            },
            // Upstream failures are opaque to callers; detail goes to the
            // logs, not the response.
            EngineError::ExtractionFailed { .. } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::new("EXTRACTION_FAILED", "Document processing failed"),
            },
            EngineError::RenderFailed { .. } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::new("RENDER_FAILED", "Form rendering failed"),
            },
        }
    }
}
