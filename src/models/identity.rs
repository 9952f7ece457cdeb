//! Filer identity and filing status models.
//!
//! Identity data is validated eagerly, before any document leaves the
//! process, and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Valid two-letter US state and DC abbreviations.
pub const US_STATE_ABBRS: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// Taxpayer filing status, determining which policy table applies.
///
/// # Example
///
/// ```
/// use tax_return_engine::models::FilingStatus;
///
/// assert_eq!(FilingStatus::Single.as_str(), "Single");
/// assert_eq!(
///     FilingStatus::parse("Married Filing Jointly"),
///     Some(FilingStatus::MarriedFilingJointly)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilingStatus {
    /// Single filer.
    Single,
    /// Married filing jointly.
    #[serde(rename = "Married Filing Jointly")]
    MarriedFilingJointly,
    /// Married filing separately.
    #[serde(rename = "Married Filing Separately")]
    MarriedFilingSeparately,
    /// Head of household.
    #[serde(rename = "Head of Household")]
    HeadOfHousehold,
    /// Qualifying surviving spouse.
    #[serde(rename = "Qualifying Surviving Spouse")]
    QualifyingSurvivingSpouse,
}

impl FilingStatus {
    /// Returns the Form 1040 wording for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
            Self::QualifyingSurvivingSpouse => "Qualifying Surviving Spouse",
        }
    }

    /// Parses the Form 1040 wording into a filing status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Single" => Some(Self::Single),
            "Married Filing Jointly" => Some(Self::MarriedFilingJointly),
            "Married Filing Separately" => Some(Self::MarriedFilingSeparately),
            "Head of Household" => Some(Self::HeadOfHousehold),
            "Qualifying Surviving Spouse" => Some(Self::QualifyingSurvivingSpouse),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated identity fields as received from the caller.
///
/// Converted into a [`UserIdentity`] via [`IdentityInput::validate`], which
/// is the only way to construct one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityInput {
    /// First name and middle initial.
    pub first_name_middle_initial: String,
    /// Last name.
    pub last_name: String,
    /// Social Security Number; non-digit characters are stripped.
    pub ssn: String,
    /// Home address (street and number).
    pub address: String,
    /// Apartment number, if any.
    pub apt_no: Option<String>,
    /// City.
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// ZIP code; non-digit characters are stripped.
    pub zip_code: String,
    /// Filing status wording as it appears on Form 1040.
    pub filing_status: String,
}

impl IdentityInput {
    /// Validates every field and produces an immutable [`UserIdentity`].
    ///
    /// Fails fast with [`EngineError::InvalidIdentity`] on the first bad
    /// field: empty required fields, an SSN that is not exactly 9 digits
    /// after stripping separators, a ZIP that is not exactly 5 digits, a
    /// state outside the US state/DC list, or unknown filing status wording.
    pub fn validate(self) -> EngineResult<UserIdentity> {
        let first_name_middle_initial =
            require_non_empty("first_name_middle_initial", &self.first_name_middle_initial)?;
        let last_name = require_non_empty("last_name", &self.last_name)?;
        let address = require_non_empty("address", &self.address)?;
        let city = require_non_empty("city", &self.city)?;

        let ssn: String = self.ssn.chars().filter(char::is_ascii_digit).collect();
        if ssn.len() != 9 {
            return Err(EngineError::InvalidIdentity {
                field: "ssn".to_string(),
                message: "must be exactly 9 digits".to_string(),
            });
        }

        let zip_code: String = self.zip_code.chars().filter(char::is_ascii_digit).collect();
        if zip_code.len() != 5 {
            return Err(EngineError::InvalidIdentity {
                field: "zip_code".to_string(),
                message: "must be exactly 5 digits".to_string(),
            });
        }

        let state = self.state.trim().to_ascii_uppercase();
        if !US_STATE_ABBRS.contains(&state.as_str()) {
            return Err(EngineError::InvalidIdentity {
                field: "state".to_string(),
                message: format!("'{}' is not a US state or DC abbreviation", self.state),
            });
        }

        let filing_status =
            FilingStatus::parse(self.filing_status.trim()).ok_or_else(|| {
                EngineError::InvalidIdentity {
                    field: "filing_status".to_string(),
                    message: format!("unknown filing status '{}'", self.filing_status),
                }
            })?;

        let apt_no = self
            .apt_no
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        Ok(UserIdentity {
            first_name_middle_initial,
            last_name,
            ssn,
            address,
            apt_no,
            city,
            state,
            zip_code,
            filing_status,
        })
    }
}

fn require_non_empty(field: &str, value: &str) -> EngineResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidIdentity {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Validated filer identity, passed by reference through the pipeline.
///
/// Constructed once per submission via [`IdentityInput::validate`] and never
/// mutated afterwards. The SSN and ZIP hold digits only; the state is an
/// uppercase two-letter abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    /// First name and middle initial.
    pub first_name_middle_initial: String,
    /// Last name.
    pub last_name: String,
    /// Social Security Number, exactly 9 digits.
    pub ssn: String,
    /// Home address (street and number).
    pub address: String,
    /// Apartment number, if any.
    pub apt_no: Option<String>,
    /// City.
    pub city: String,
    /// Two-letter state abbreviation, uppercase.
    pub state: String,
    /// ZIP code, exactly 5 digits.
    pub zip_code: String,
    /// Filing status for the return.
    pub filing_status: FilingStatus,
}
