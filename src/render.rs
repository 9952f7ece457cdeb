//! The form rendering collaborator boundary.
//!
//! Writing values into a PDF template's named widgets is an external,
//! black-box capability. The engine hands a renderer a field-name to
//! display-string mapping plus the checkboxes to tick, and checks at startup
//! that the template actually declares every field the engine fills.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{EngineError, EngineResult};
use crate::models::Form1040;

/// The rendering collaborator.
///
/// Failures are opaque to the engine and terminal for the submission.
pub trait FormRenderer: Send + Sync {
    /// Returns the field names the loaded template declares.
    ///
    /// Used once, at pipeline construction, to fail fast on a template that
    /// cannot hold the engine's output.
    fn template_fields(&self) -> EngineResult<BTreeSet<String>>;

    /// Fills the template and returns the rendered document bytes.
    fn render(
        &self,
        text_fields: &BTreeMap<String, String>,
        checkboxes: &BTreeMap<String, bool>,
    ) -> EngineResult<Vec<u8>>;
}

/// Checks that the renderer's template declares every field the engine
/// fills on a Form 1040.
///
/// Fails with [`EngineError::RenderFailed`] naming the missing fields. Run
/// at startup so a mismatched template never gets as far as a submission.
pub fn validate_template(renderer: &dyn FormRenderer) -> EngineResult<()> {
    let declared = renderer.template_fields()?;

    let missing: Vec<&str> = Form1040::required_template_fields()
        .into_iter()
        .filter(|field| !declared.contains(*field))
        .collect();

    if !missing.is_empty() {
        return Err(EngineError::RenderFailed {
            message: format!("template is missing fields: {}", missing.join(", ")),
        });
    }

    Ok(())
}
