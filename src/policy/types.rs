//! Policy table types and the bracket validity invariant.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::FilingStatus;

/// A contiguous income range taxed at one marginal rate.
///
/// `upper_limit` is `None` only for the top, unbounded bracket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// The income at which this bracket starts (inclusive).
    pub lower_limit: Decimal,
    /// The income at which this bracket ends, or `None` for the top bracket.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,
    /// The marginal rate applied within this bracket, as a fraction in [0, 1].
    pub rate: Decimal,
}

/// An immutable progressive bracket table plus standard deduction for one
/// filing status and tax year.
///
/// Construction validates the bracket set; a table that exists cannot be
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxPolicyTable {
    filing_status: FilingStatus,
    tax_year: i32,
    standard_deduction: Decimal,
    brackets: Vec<TaxBracket>,
}

impl TaxPolicyTable {
    /// Creates a validated policy table.
    ///
    /// Brackets are sorted by `lower_limit` before validation. Fails with
    /// [`EngineError::InvalidPolicyTable`] unless:
    /// - there is at least one bracket and the first starts at zero
    /// - brackets are contiguous: each `upper_limit` equals the next
    ///   bracket's `lower_limit`, with no gaps or overlaps
    /// - exactly the last bracket is unbounded (`upper_limit` is `None`)
    /// - every rate lies within `[0, 1]`
    /// - the standard deduction is non-negative
    pub fn new(
        filing_status: FilingStatus,
        tax_year: i32,
        standard_deduction: Decimal,
        mut brackets: Vec<TaxBracket>,
    ) -> EngineResult<Self> {
        brackets.sort_by(|a, b| a.lower_limit.cmp(&b.lower_limit));

        if brackets.is_empty() {
            return Err(invalid("bracket set is empty"));
        }
        if brackets[0].lower_limit != Decimal::ZERO {
            return Err(invalid(&format!(
                "lowest bracket starts at {}, expected 0",
                brackets[0].lower_limit
            )));
        }
        if standard_deduction < Decimal::ZERO {
            return Err(invalid("standard deduction must not be negative"));
        }

        for (i, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(&format!(
                    "rate {} is outside [0, 1]",
                    bracket.rate
                )));
            }

            let is_last = i == brackets.len() - 1;
            match (bracket.upper_limit, is_last) {
                (None, false) => {
                    return Err(invalid(&format!(
                        "unbounded bracket at {} is not the top bracket",
                        bracket.lower_limit
                    )));
                }
                (Some(_), true) => {
                    return Err(invalid("top bracket must be unbounded"));
                }
                (Some(upper), false) => {
                    if upper <= bracket.lower_limit {
                        return Err(invalid(&format!(
                            "bracket at {} has upper limit {} at or below its lower limit",
                            bracket.lower_limit, upper
                        )));
                    }
                    let next_lower = brackets[i + 1].lower_limit;
                    if upper != next_lower {
                        return Err(invalid(&format!(
                            "bracket ending at {} does not meet the next bracket at {}",
                            upper, next_lower
                        )));
                    }
                }
                (None, true) => {}
            }
        }

        Ok(Self {
            filing_status,
            tax_year,
            standard_deduction,
            brackets,
        })
    }

    /// Returns the filing status this table applies to.
    pub fn filing_status(&self) -> FilingStatus {
        self.filing_status
    }

    /// Returns the tax year this table applies to.
    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// Returns the standard deduction.
    pub fn standard_deduction(&self) -> Decimal {
        self.standard_deduction
    }

    /// Returns the brackets in ascending order of `lower_limit`.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

/// An immutable collection of policy tables keyed by filing status and year.
#[derive(Debug, Clone, Default)]
pub struct PolicySet {
    tables: HashMap<(FilingStatus, i32), TaxPolicyTable>,
}

impl PolicySet {
    /// Creates an empty policy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table to the set.
    ///
    /// Fails with [`EngineError::InvalidPolicyTable`] if a table for the same
    /// filing status and year is already present; two tables for one key
    /// means the configuration is ambiguous.
    pub fn insert(&mut self, table: TaxPolicyTable) -> EngineResult<()> {
        let key = (table.filing_status(), table.tax_year());
        if self.tables.contains_key(&key) {
            return Err(invalid(&format!(
                "duplicate table for filing status '{}' in tax year {}",
                key.0, key.1
            )));
        }
        self.tables.insert(key, table);
        Ok(())
    }

    /// Looks up the table for a filing status and year.
    ///
    /// A miss is [`EngineError::UnsupportedFilingStatus`], never a silent
    /// fallback to some other table.
    pub fn table_for(&self, status: FilingStatus, tax_year: i32) -> EngineResult<&TaxPolicyTable> {
        self.tables
            .get(&(status, tax_year))
            .ok_or(EngineError::UnsupportedFilingStatus { status, tax_year })
    }

    /// Returns the number of tables in the set.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the set holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn invalid(message: &str) -> EngineError {
    EngineError::InvalidPolicyTable {
        message: message.to_string(),
    }
}
