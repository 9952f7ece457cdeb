//! Error types for the Tax Return Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur while processing a submission.

use thiserror::Error;

use crate::models::{FilingStatus, FormType};

/// A single field-level problem found while validating extracted form data.
///
/// Collected into [`EngineError::InvalidFormData`] so a submission with
/// several bad fields reports all of them at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// The form type the field belongs to.
    pub form_type: FormType,
    /// The field name as extracted from the document.
    pub field: String,
    /// A description of what is wrong with the field.
    pub message: String,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.form_type, self.field, self.message)
    }
}

/// The main error type for the Tax Return Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tax_return_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/table.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/table.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A policy table violated the bracket validity invariant.
    ///
    /// This is a configuration defect, never user-triggered in normal
    /// operation.
    #[error("Invalid tax policy table: {message}")]
    InvalidPolicyTable {
        /// A description of the violated invariant.
        message: String,
    },

    /// No policy table exists for the requested filing status and year.
    #[error("No tax policy table for filing status '{status}' in tax year {tax_year}")]
    UnsupportedFilingStatus {
        /// The requested filing status.
        status: FilingStatus,
        /// The requested tax year.
        tax_year: i32,
    },

    /// A monetary field could not be parsed as a decimal amount.
    #[error("Invalid amount in field '{field}': '{value}'")]
    InvalidAmount {
        /// The field that failed to parse.
        field: String,
        /// The offending input value.
        value: String,
    },

    /// A filer identity field was missing or malformed.
    #[error("Invalid identity field '{field}': {message}")]
    InvalidIdentity {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The submission carried the wrong number of documents.
    #[error("Expected between 1 and 3 documents, got {count}")]
    InvalidDocumentCount {
        /// The number of documents submitted.
        count: usize,
    },

    /// Extracted form data failed schema validation during aggregation.
    #[error("Invalid form data: {}", format_issues(.issues))]
    InvalidFormData {
        /// The individual field-level problems.
        issues: Vec<FieldIssue>,
    },

    /// The extraction collaborator failed. Opaque and terminal for the
    /// submission; never retried.
    #[error("Document extraction failed: {message}")]
    ExtractionFailed {
        /// A description of the upstream failure.
        message: String,
    },

    /// The rendering collaborator failed. Opaque and terminal for the
    /// submission; never retried.
    #[error("Form rendering failed: {message}")]
    RenderFailed {
        /// A description of the upstream failure.
        message: String,
    },
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
