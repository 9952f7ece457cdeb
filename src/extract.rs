//! The document extraction collaborator boundary.
//!
//! Reading monetary fields out of scanned documents is an external,
//! black-box capability (an OCR/vision service in production). The engine
//! only depends on this trait; tests substitute stubs.

use std::collections::BTreeMap;

use crate::error::EngineResult;
use crate::models::FormType;

/// One uploaded document, as raw bytes plus the caller's file name.
#[derive(Debug, Clone)]
pub struct DocumentBuffer {
    /// The file name as submitted by the caller.
    pub filename: String,
    /// The raw document bytes.
    pub bytes: Vec<u8>,
}

/// One form's worth of extracted data: the declared form type plus the raw
/// field values as the extraction service read them.
///
/// Field values are unnormalized strings; the aggregator runs them through
/// the monetary normalizer, so an extractor may return `"12,345.67"` as-is.
#[derive(Debug, Clone)]
pub struct ExtractedForm {
    /// The form type the extractor identified.
    pub form_type: FormType,
    /// Raw field name to raw value, e.g. `"wages" -> "50,000.00"`.
    pub fields: BTreeMap<String, String>,
}

impl ExtractedForm {
    /// Creates an extracted form from a list of field pairs.
    pub fn new<I, K, V>(form_type: FormType, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            form_type,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The extraction collaborator.
///
/// Receives the submission's documents in order and returns one
/// [`ExtractedForm`] per recognized document. Failures are opaque to the
/// engine and terminal for the submission; the engine never retries, since
/// retrying a paid extraction call risks duplicate cost.
pub trait FormExtractor: Send + Sync {
    /// Extracts structured form data from the submitted documents.
    fn extract(&self, documents: &[DocumentBuffer]) -> EngineResult<Vec<ExtractedForm>>;
}
