//! Application state for the Tax Return Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::pipeline::SubmissionPipeline;
use crate::store::DocumentStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// submission pipeline and the rendered-document store.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<SubmissionPipeline>,
    store: Arc<DocumentStore>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(pipeline: SubmissionPipeline, store: DocumentStore) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the submission pipeline.
    pub fn pipeline(&self) -> &SubmissionPipeline {
        &self.pipeline
    }

    /// Returns a reference to the document store.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }
}
