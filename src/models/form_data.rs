//! Extracted tax form data models.
//!
//! These types hold the monetary fields pulled out of submitted documents
//! after normalization, one record per supported form type, plus the
//! aggregate [`TaxFormData`] the calculator consumes.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The supported tax document types.
///
/// # Example
///
/// ```
/// use tax_return_engine::models::FormType;
///
/// assert_eq!(FormType::W2.to_string(), "W-2");
/// assert_eq!(FormType::parse("1099-INT"), Some(FormType::Int1099));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// Form W-2, Wage and Tax Statement.
    #[serde(rename = "W-2")]
    W2,
    /// Form 1099-NEC, Nonemployee Compensation.
    #[serde(rename = "1099-NEC")]
    Nec1099,
    /// Form 1099-INT, Interest Income.
    #[serde(rename = "1099-INT")]
    Int1099,
}

impl FormType {
    /// Returns the IRS form label for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::W2 => "W-2",
            Self::Nec1099 => "1099-NEC",
            Self::Int1099 => "1099-INT",
        }
    }

    /// Parses an IRS form label into a form type.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "W-2" => Some(Self::W2),
            "1099-NEC" => Some(Self::Nec1099),
            "1099-INT" => Some(Self::Int1099),
            _ => None,
        }
    }
}

impl std::fmt::Display for FormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monetary fields extracted from a Form W-2.
///
/// Both fields are required when a W-2 is submitted; a W-2 without a wages
/// box is not a readable W-2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct W2Data {
    /// Wages, salaries, and tips (W-2 Box 1).
    pub wages: Decimal,
    /// Federal income tax withheld (W-2 Box 2).
    pub federal_income_tax_withheld: Decimal,
}

/// Monetary fields extracted from a Form 1099-NEC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NecData {
    /// Nonemployee compensation (1099-NEC Box 1).
    pub nonemployee_compensation: Decimal,
}

/// Monetary fields extracted from a Form 1099-INT.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntData {
    /// Interest income (1099-INT Box 1).
    pub interest_income: Decimal,
}

/// The aggregate of all extracted form data for one submission.
///
/// Records for form types that were not submitted default to zero, while
/// `forms_submitted` records exactly which types were populated from real
/// extracted data so the summary can report provenance to the filer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxFormData {
    /// W-2 data, zeroed if no W-2 was submitted.
    pub w2: W2Data,
    /// 1099-NEC data, zeroed if no 1099-NEC was submitted.
    pub nec_1099: NecData,
    /// 1099-INT data, zeroed if no 1099-INT was submitted.
    pub int_1099: IntData,
    /// The form types that were actually extracted from documents.
    pub forms_submitted: BTreeSet<FormType>,
}
