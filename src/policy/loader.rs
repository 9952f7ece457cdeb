//! Policy table loading from YAML configuration files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::FilingStatus;

use super::types::{PolicySet, TaxBracket, TaxPolicyTable};

/// On-disk shape of a single policy table file.
#[derive(Debug, Deserialize)]
struct PolicyTableFile {
    tax_year: i32,
    filing_status: FilingStatus,
    standard_deduction: Decimal,
    brackets: Vec<TaxBracket>,
}

/// Loads policy tables from a configuration directory.
///
/// Every `.yaml` file in the directory defines one table for one
/// `(filing_status, tax_year)` pair and is validated on load, so a
/// misconfigured bracket set fails at startup rather than mid-submission.
///
/// # Directory Structure
///
/// ```text
/// config/federal/
/// └── 2024_single.yaml   # Single filer table for tax year 2024
/// ```
///
/// # Example
///
/// ```no_run
/// use tax_return_engine::policy::PolicyLoader;
///
/// let policies = PolicyLoader::load("./config/federal")?;
/// # Ok::<(), tax_return_engine::error::EngineError>(())
/// ```
pub struct PolicyLoader;

impl PolicyLoader {
    /// Loads and validates every policy table file in the directory.
    ///
    /// # Returns
    ///
    /// Returns the assembled [`PolicySet`] on success, or an error if:
    /// - the directory does not exist or holds no `.yaml` files
    /// - any file contains invalid YAML (`ConfigParseError`)
    /// - any table violates the bracket invariant (`InvalidPolicyTable`)
    /// - two files define the same filing status and year
    pub fn load<P: AsRef<Path>>(dir: P) -> EngineResult<PolicySet> {
        let dir = dir.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut set = PolicySet::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                set.insert(Self::load_table(&path)?)?;
            }
        }

        if set.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{}/*.yaml", dir_str),
            });
        }

        Ok(set)
    }

    /// Loads and validates a single policy table file.
    fn load_table(path: &Path) -> EngineResult<TaxPolicyTable> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let file: PolicyTableFile =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        TaxPolicyTable::new(
            file.filing_status,
            file.tax_year,
            file.standard_deduction,
            file.brackets,
        )
    }
}
