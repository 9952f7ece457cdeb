//! Document data aggregation.
//!
//! Combines per-document extracted payloads into one validated
//! [`TaxFormData`], normalizing every monetary field and recording which
//! form types were actually submitted. Validation problems are collected
//! across all documents and fields so the caller sees every issue at once,
//! not just the first.

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::error::{EngineError, EngineResult, FieldIssue};
use crate::extract::ExtractedForm;
use crate::models::{FormType, IntData, NecData, TaxFormData, W2Data};
use crate::money;

/// Field names expected on a W-2 payload. Both are required; a W-2 the
/// extractor could not read a wages box from is not usable.
const W2_WAGES: &str = "wages";
const W2_WITHHELD: &str = "federal_income_tax_withheld";

/// Field name expected on a 1099-NEC payload. Optional, defaults to zero.
const NEC_COMPENSATION: &str = "nonemployee_compensation";

/// Field name expected on a 1099-INT payload. Optional, defaults to zero.
const INT_INTEREST: &str = "interest_income";

/// Merges extracted form payloads into one [`TaxFormData`].
///
/// Per payload, the declared form type selects the schema; each monetary
/// field is normalized via [`money::parse`] and checked non-negative. W-2
/// fields must be present; 1099 fields default to zero when absent. A second
/// payload of an already-seen form type is rejected rather than silently
/// overwriting or summing, so the filer learns about the duplicate instead
/// of getting a summary built from an arbitrary one of the two.
///
/// Order-independent across payloads of distinct types. Fails with
/// [`EngineError::InvalidFormData`] carrying every field-level issue found.
pub fn aggregate(forms: &[ExtractedForm]) -> EngineResult<TaxFormData> {
    let mut data = TaxFormData::default();
    let mut seen: BTreeSet<FormType> = BTreeSet::new();
    let mut issues: Vec<FieldIssue> = Vec::new();

    for form in forms {
        if !seen.insert(form.form_type) {
            issues.push(FieldIssue {
                form_type: form.form_type,
                field: "form_type".to_string(),
                message: format!("duplicate {} submitted", form.form_type),
            });
            continue;
        }

        match form.form_type {
            FormType::W2 => {
                let wages = required_amount(form, W2_WAGES, &mut issues);
                let withheld = required_amount(form, W2_WITHHELD, &mut issues);
                data.w2 = W2Data {
                    wages,
                    federal_income_tax_withheld: withheld,
                };
            }
            FormType::Nec1099 => {
                data.nec_1099 = NecData {
                    nonemployee_compensation: optional_amount(form, NEC_COMPENSATION, &mut issues),
                };
            }
            FormType::Int1099 => {
                data.int_1099 = IntData {
                    interest_income: optional_amount(form, INT_INTEREST, &mut issues),
                };
            }
        }
    }

    if !issues.is_empty() {
        return Err(EngineError::InvalidFormData { issues });
    }

    data.forms_submitted = seen;
    Ok(data)
}

/// Normalizes a field that must be present on the payload.
fn required_amount(form: &ExtractedForm, field: &str, issues: &mut Vec<FieldIssue>) -> Decimal {
    match form.fields.get(field) {
        Some(raw) => checked_amount(form.form_type, field, raw, issues),
        None => {
            issues.push(FieldIssue {
                form_type: form.form_type,
                field: field.to_string(),
                message: "missing required field".to_string(),
            });
            Decimal::ZERO
        }
    }
}

/// Normalizes a field that defaults to zero when absent.
fn optional_amount(form: &ExtractedForm, field: &str, issues: &mut Vec<FieldIssue>) -> Decimal {
    match form.fields.get(field) {
        Some(raw) => checked_amount(form.form_type, field, raw, issues),
        None => Decimal::ZERO,
    }
}

/// Parses and range-checks one monetary field, recording any issue.
fn checked_amount(
    form_type: FormType,
    field: &str,
    raw: &str,
    issues: &mut Vec<FieldIssue>,
) -> Decimal {
    match money::parse(field, raw) {
        Ok(amount) if amount < Decimal::ZERO => {
            issues.push(FieldIssue {
                form_type,
                field: field.to_string(),
                message: format!("must not be negative, got '{}'", raw),
            });
            Decimal::ZERO
        }
        Ok(amount) => amount,
        Err(_) => {
            issues.push(FieldIssue {
                form_type,
                field: field.to_string(),
                message: format!("not a valid monetary amount: '{}'", raw),
            });
            Decimal::ZERO
        }
    }
}
