//! Core data models for the Tax Return Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod form1040;
mod form_data;
mod identity;
mod summary;

pub use form1040::Form1040;
pub use form_data::{FormType, IntData, NecData, TaxFormData, W2Data};
pub use identity::{FilingStatus, IdentityInput, US_STATE_ABBRS, UserIdentity};
pub use summary::TaxReturnSummary;
