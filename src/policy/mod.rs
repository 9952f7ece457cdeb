//! Tax policy tables: progressive brackets and standard deductions.
//!
//! Tables are loaded from YAML files at startup, validated eagerly, and held
//! immutable in a [`PolicySet`] keyed by filing status and tax year.
//!
//! # Example
//!
//! ```no_run
//! use tax_return_engine::models::FilingStatus;
//! use tax_return_engine::policy::PolicyLoader;
//!
//! let policies = PolicyLoader::load("./config/federal").unwrap();
//! let table = policies.table_for(FilingStatus::Single, 2024).unwrap();
//! println!("Standard deduction: {}", table.standard_deduction());
//! ```

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{PolicySet, TaxBracket, TaxPolicyTable};
