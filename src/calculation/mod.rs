//! Tax calculation logic for the Tax Return Engine.
//!
//! This module contains the pure calculation functions: the progressive
//! bracket walk that computes tax owed on taxable income, and the summary
//! builder that turns aggregated form data into a full return summary.
//! Nothing here performs I/O; given the same inputs the results are
//! identical, which keeps test fixtures reproducible.

mod summary;
mod tax;

pub use summary::summarize;
pub use tax::compute_tax;
