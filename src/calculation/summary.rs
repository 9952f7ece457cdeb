//! Return summary construction.

use rust_decimal::Decimal;

use crate::models::{TaxFormData, TaxReturnSummary};
use crate::money;
use crate::policy::TaxPolicyTable;

use super::compute_tax;

/// Builds the full return summary from aggregated form data.
///
/// Steps, in order:
/// 1. total income = wages + nonemployee compensation + interest income,
///    with absent forms contributing their zero defaults
/// 2. taxable income = max(total income - standard deduction, 0)
/// 3. tax due via [`compute_tax`]
/// 4. withholding, sourced from the W-2 only (zero without one)
/// 5. the refund/owed split: whichever of withholding and tax due is larger
///    determines which side is nonzero, so the two are mutually exclusive
///
/// All monetary outputs are rounded to two decimal places. The function is
/// pure: no I/O, no clock, no randomness.
pub fn summarize(data: &TaxFormData, table: &TaxPolicyTable) -> TaxReturnSummary {
    let total_income = data.w2.wages
        + data.nec_1099.nonemployee_compensation
        + data.int_1099.interest_income;
    let tax_withheld = data.w2.federal_income_tax_withheld;

    let taxable_income = (total_income - table.standard_deduction()).max(Decimal::ZERO);
    let estimated_tax_due = compute_tax(taxable_income, table);

    let (estimated_refund, amount_owed) = if tax_withheld >= estimated_tax_due {
        (tax_withheld - estimated_tax_due, Decimal::ZERO)
    } else {
        (Decimal::ZERO, estimated_tax_due - tax_withheld)
    };

    TaxReturnSummary {
        forms_submitted: data.forms_submitted.clone(),
        total_income: money::round_half_up(total_income),
        taxable_income: money::round_half_up(taxable_income),
        total_tax_withheld: money::round_half_up(tax_withheld),
        estimated_tax_due,
        estimated_refund: money::round_half_up(estimated_refund),
        amount_owed: money::round_half_up(amount_owed),
    }
}
