//! Progressive bracket tax computation.

use rust_decimal::Decimal;

use crate::money;
use crate::policy::TaxPolicyTable;

/// Computes the tax owed on `taxable_income` under the table's brackets.
///
/// Walks the brackets in ascending order. Each bracket whose `lower_limit`
/// is below the income contributes `rate * (min(income, upper) - lower)`,
/// where the top bracket's missing upper limit is treated as the income
/// itself. The walk stops at the first bracket that starts at or above the
/// income; brackets fully above the income contribute nothing.
///
/// Rounding to the cent happens once, after accumulation. Rounding each
/// bracket's contribution separately would drift from the closed-form value
/// by up to half a cent per bracket and is deliberately not done.
///
/// Taxable income at or below zero yields zero tax.
///
/// # Example
///
/// ```no_run
/// use rust_decimal::Decimal;
/// use tax_return_engine::calculation::compute_tax;
/// use tax_return_engine::models::FilingStatus;
/// use tax_return_engine::policy::PolicyLoader;
///
/// let policies = PolicyLoader::load("./config/federal").unwrap();
/// let table = policies.table_for(FilingStatus::Single, 2024).unwrap();
/// let tax = compute_tax(Decimal::from(35400), table);
/// assert_eq!(tax, Decimal::new(401600, 2)); // 4016.00
/// ```
pub fn compute_tax(taxable_income: Decimal, table: &TaxPolicyTable) -> Decimal {
    let mut tax = Decimal::ZERO;

    for bracket in table.brackets() {
        if taxable_income <= bracket.lower_limit {
            break;
        }

        let upper = bracket.upper_limit.unwrap_or(taxable_income);
        let amount_in_bracket = taxable_income.min(upper) - bracket.lower_limit;
        if amount_in_bracket > Decimal::ZERO {
            tax += amount_in_bracket * bracket.rate;
        }
    }

    money::round_half_up(tax)
}
