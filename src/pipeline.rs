//! The form-fill submission pipeline.
//!
//! One submission flows linearly through extraction, aggregation,
//! calculation, and rendering, failing terminally at the first error. The
//! document count is validated before the extraction collaborator is
//! invoked, so a malformed submission never incurs an extraction call.

use std::sync::Arc;

use tracing::debug;

use crate::aggregation;
use crate::calculation;
use crate::error::{EngineError, EngineResult};
use crate::extract::{DocumentBuffer, FormExtractor};
use crate::models::{Form1040, TaxReturnSummary, UserIdentity};
use crate::policy::PolicySet;
use crate::render::{self, FormRenderer};

/// The inclusive bounds on documents per submission.
pub const MIN_DOCUMENTS: usize = 1;
/// Upper bound: at most one of each supported form type.
pub const MAX_DOCUMENTS: usize = 3;

/// The successful result of one submission.
#[derive(Debug)]
pub struct SubmissionOutcome {
    /// The computed tax return summary.
    pub summary: TaxReturnSummary,
    /// The rendered, filled Form 1040.
    pub rendered: Vec<u8>,
}

/// Runs submissions end to end against a fixed policy set, extractor, and
/// renderer.
///
/// Construction validates the renderer's template against the Form 1040
/// field mapping, so a template that cannot hold the engine's output is
/// rejected at startup rather than on the first submission.
pub struct SubmissionPipeline {
    extractor: Arc<dyn FormExtractor>,
    renderer: Arc<dyn FormRenderer>,
    policies: PolicySet,
    tax_year: i32,
}

impl std::fmt::Debug for SubmissionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionPipeline")
            .field("tax_year", &self.tax_year)
            .finish_non_exhaustive()
    }
}

impl SubmissionPipeline {
    /// Creates a pipeline, failing fast on a template field mismatch.
    pub fn new(
        extractor: Arc<dyn FormExtractor>,
        renderer: Arc<dyn FormRenderer>,
        policies: PolicySet,
        tax_year: i32,
    ) -> EngineResult<Self> {
        render::validate_template(renderer.as_ref())?;
        Ok(Self {
            extractor,
            renderer,
            policies,
            tax_year,
        })
    }

    /// Returns the tax year this pipeline files for.
    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// Processes one submission: extraction, aggregation, calculation,
    /// rendering.
    ///
    /// The identity is already validated by construction; the document count
    /// is checked here, before any external call. Each stage's failure is
    /// terminal; no stage is retried and no partial summary is ever
    /// produced.
    pub fn process(
        &self,
        documents: &[DocumentBuffer],
        identity: &UserIdentity,
    ) -> EngineResult<SubmissionOutcome> {
        if documents.len() < MIN_DOCUMENTS || documents.len() > MAX_DOCUMENTS {
            return Err(EngineError::InvalidDocumentCount {
                count: documents.len(),
            });
        }

        debug!(stage = "extracting", documents = documents.len());
        let extracted = self.extractor.extract(documents)?;

        debug!(stage = "aggregating", forms = extracted.len());
        let data = aggregation::aggregate(&extracted)?;

        debug!(stage = "calculating", filing_status = %identity.filing_status);
        let table = self
            .policies
            .table_for(identity.filing_status, self.tax_year)?;
        let summary = calculation::summarize(&data, table);

        debug!(stage = "rendering");
        let form = Form1040::from_summary(&data, &summary, table.standard_deduction());
        let rendered = self.renderer.render(
            &form.text_fields(identity),
            &Form1040::checkbox_fields(identity),
        )?;

        Ok(SubmissionOutcome { summary, rendered })
    }
}
