//! The Form 1040 line model and template field mapping.
//!
//! Each logical line is mapped to the template's widget name by a statically
//! declared table rather than resolved per call, so a template that is
//! missing a field fails at startup instead of producing a silently
//! half-filled form.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use super::{FilingStatus, TaxFormData, TaxReturnSummary, UserIdentity};

/// Template field names for the monetary lines, keyed by 1040 line number.
const LINE_WAGES: &str = "1a";
const LINE_TAXABLE_INTEREST: &str = "2b";
const LINE_OTHER_INCOME: &str = "8";
const LINE_TOTAL_INCOME: &str = "9";
const LINE_ADJUSTED_GROSS_INCOME: &str = "11";
const LINE_STANDARD_DEDUCTION: &str = "12";
const LINE_TAXABLE_INCOME: &str = "15";
const LINE_TAX: &str = "16";
const LINE_FEDERAL_TAX_WITHHELD: &str = "25a";
const LINE_TOTAL_PAYMENTS: &str = "33";
const LINE_REFUND: &str = "34";
const LINE_AMOUNT_OWED: &str = "37";

/// Template field names for the identity block.
const IDENTITY_FIELDS: [&str; 8] = [
    "first_name_middle_initial",
    "last_name",
    "ssn",
    "address",
    "apt_no",
    "city",
    "state",
    "zip_code",
];

/// The monetary lines of a filled Form 1040.
///
/// Built from aggregated form data and the computed summary; no value is
/// recomputed here, this is purely the projection onto 1040 line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form1040 {
    /// Line 1a: wages from Form W-2 Box 1.
    pub wages: Decimal,
    /// Line 2b: taxable interest from Form 1099-INT.
    pub taxable_interest: Decimal,
    /// Line 8: other income, here nonemployee compensation from 1099-NEC.
    pub other_income: Decimal,
    /// Line 9: total income.
    pub total_income: Decimal,
    /// Line 11: adjusted gross income (equal to total income in this core).
    pub adjusted_gross_income: Decimal,
    /// Line 12: standard deduction for the filing status.
    pub standard_deduction: Decimal,
    /// Line 15: taxable income.
    pub taxable_income: Decimal,
    /// Line 16: tax computed from the bracket table.
    pub tax: Decimal,
    /// Line 25a: federal income tax withheld from Form W-2.
    pub federal_tax_withheld: Decimal,
    /// Line 33: total payments.
    pub total_payments: Decimal,
    /// Line 34: refund, if payments exceed tax due.
    pub refund: Decimal,
    /// Line 37: amount owed, if tax due exceeds payments.
    pub amount_owed: Decimal,
}

impl Form1040 {
    /// Projects aggregated form data and a computed summary onto 1040 lines.
    pub fn from_summary(
        data: &TaxFormData,
        summary: &TaxReturnSummary,
        standard_deduction: Decimal,
    ) -> Self {
        Self {
            wages: data.w2.wages,
            taxable_interest: data.int_1099.interest_income,
            other_income: data.nec_1099.nonemployee_compensation,
            total_income: summary.total_income,
            adjusted_gross_income: summary.total_income,
            standard_deduction,
            taxable_income: summary.taxable_income,
            tax: summary.estimated_tax_due,
            federal_tax_withheld: data.w2.federal_income_tax_withheld,
            total_payments: summary.total_tax_withheld,
            refund: summary.estimated_refund,
            amount_owed: summary.amount_owed,
        }
    }

    /// Returns the template text fields to fill: every monetary line plus
    /// the identity block, keyed by template field name.
    pub fn text_fields(&self, identity: &UserIdentity) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();

        let lines = [
            (LINE_WAGES, self.wages),
            (LINE_TAXABLE_INTEREST, self.taxable_interest),
            (LINE_OTHER_INCOME, self.other_income),
            (LINE_TOTAL_INCOME, self.total_income),
            (LINE_ADJUSTED_GROSS_INCOME, self.adjusted_gross_income),
            (LINE_STANDARD_DEDUCTION, self.standard_deduction),
            (LINE_TAXABLE_INCOME, self.taxable_income),
            (LINE_TAX, self.tax),
            (LINE_FEDERAL_TAX_WITHHELD, self.federal_tax_withheld),
            (LINE_TOTAL_PAYMENTS, self.total_payments),
            (LINE_REFUND, self.refund),
            (LINE_AMOUNT_OWED, self.amount_owed),
        ];
        for (name, amount) in lines {
            fields.insert(name.to_string(), amount.to_string());
        }

        fields.insert(
            "first_name_middle_initial".to_string(),
            identity.first_name_middle_initial.clone(),
        );
        fields.insert("last_name".to_string(), identity.last_name.clone());
        fields.insert("ssn".to_string(), identity.ssn.clone());
        fields.insert("address".to_string(), identity.address.clone());
        fields.insert(
            "apt_no".to_string(),
            identity.apt_no.clone().unwrap_or_default(),
        );
        fields.insert("city".to_string(), identity.city.clone());
        fields.insert("state".to_string(), identity.state.clone());
        fields.insert("zip_code".to_string(), identity.zip_code.clone());

        fields
    }

    /// Returns the checkbox fields to tick: exactly the filing status box.
    pub fn checkbox_fields(identity: &UserIdentity) -> BTreeMap<String, bool> {
        BTreeMap::from([(checkbox_for(identity.filing_status).to_string(), true)])
    }

    /// Every template field name the engine fills.
    ///
    /// Checked against the renderer's declared field set when the pipeline is
    /// constructed.
    pub fn required_template_fields() -> BTreeSet<&'static str> {
        let mut fields = BTreeSet::from([
            LINE_WAGES,
            LINE_TAXABLE_INTEREST,
            LINE_OTHER_INCOME,
            LINE_TOTAL_INCOME,
            LINE_ADJUSTED_GROSS_INCOME,
            LINE_STANDARD_DEDUCTION,
            LINE_TAXABLE_INCOME,
            LINE_TAX,
            LINE_FEDERAL_TAX_WITHHELD,
            LINE_TOTAL_PAYMENTS,
            LINE_REFUND,
            LINE_AMOUNT_OWED,
        ]);
        fields.extend(IDENTITY_FIELDS);
        fields.extend(ALL_CHECKBOXES);
        fields
    }
}

const ALL_CHECKBOXES: [&str; 5] = [
    "filing_status_single_checkbox",
    "filing_status_married_joint_checkbox",
    "filing_status_married_separate_checkbox",
    "filing_status_head_checkbox",
    "filing_status_qualifying_spouse_checkbox",
];

/// Returns the template checkbox name for a filing status.
fn checkbox_for(status: FilingStatus) -> &'static str {
    match status {
        FilingStatus::Single => "filing_status_single_checkbox",
        FilingStatus::MarriedFilingJointly => "filing_status_married_joint_checkbox",
        FilingStatus::MarriedFilingSeparately => "filing_status_married_separate_checkbox",
        FilingStatus::HeadOfHousehold => "filing_status_head_checkbox",
        FilingStatus::QualifyingSurvivingSpouse => "filing_status_qualifying_spouse_checkbox",
    }
}
