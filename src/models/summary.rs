//! The tax return summary returned to the caller.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FormType;

/// The computed federal income-tax summary for one submission.
///
/// Produced once per submission by the tax calculator, immutable after
/// creation. All amounts are non-negative and rounded to cents. Exactly one
/// of `estimated_refund` and `amount_owed` is nonzero (or both are zero when
/// withholding matches tax due to the cent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReturnSummary {
    /// The form types that contributed extracted data.
    pub forms_submitted: BTreeSet<FormType>,
    /// Wages + nonemployee compensation + interest income.
    pub total_income: Decimal,
    /// Total income minus the standard deduction, floored at zero.
    pub taxable_income: Decimal,
    /// Federal income tax withheld, per the submitted W-2.
    pub total_tax_withheld: Decimal,
    /// Tax due on the taxable income under the bracket table.
    pub estimated_tax_due: Decimal,
    /// Withholding in excess of tax due, zero when tax is owed.
    pub estimated_refund: Decimal,
    /// Tax due in excess of withholding, zero when a refund is due.
    pub amount_owed: Decimal,
}
