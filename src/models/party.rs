//! Payee and payer classification.
//!
//! These types describe who is being paid and by whom, which is all the
//! engine needs to decide which rules are applicable.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Residency of the payee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayeeStatus {
    /// Resident in India for the year.
    Resident,
    /// Not resident in India for the year.
    NonResident,
}

impl PayeeStatus {
    /// A stable name for logs and audit output.
    pub fn as_str(self) -> &'static str {
        match self {
            PayeeStatus::Resident => "resident",
            PayeeStatus::NonResident => "non-resident",
        }
    }
}

/// Category of the payer making a payment to a resident.
///
/// A specified person is any person other than an individual or HUF, or an
/// individual/HUF whose turnover or gross receipts crossed the audit limits
/// in the preceding year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayerCategory {
    /// The payer is a specified person.
    Specified,
    /// Any other payer.
    NonSpecified,
}

impl PayerCategory {
    /// A stable name for logs and audit output.
    pub fn as_str(self) -> &'static str {
        match self {
            PayerCategory::Specified => "specified",
            PayerCategory::NonSpecified => "non-specified",
        }
    }
}

/// The payee/payer combination a set of rules is filtered by.
///
/// Non-resident payees carry no payer category because non-resident rules
/// apply whoever the payer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayeeProfile {
    /// A resident payee paid by a payer of the given category.
    Resident {
        /// The payer's category.
        payer: PayerCategory,
    },
    /// A non-resident payee.
    NonResident,
}

impl PayeeProfile {
    /// Builds a profile from a payee status and an optional payer category.
    ///
    /// The payer category is required for residents and discarded for
    /// non-residents.
    ///
    /// # Examples
    ///
    /// ```
    /// use tds_engine::models::{PayeeProfile, PayeeStatus, PayerCategory};
    ///
    /// let profile = PayeeProfile::new(PayeeStatus::NonResident, Some(PayerCategory::Specified))?;
    /// assert_eq!(profile, PayeeProfile::NonResident);
    ///
    /// assert!(PayeeProfile::new(PayeeStatus::Resident, None).is_err());
    /// # Ok::<(), tds_engine::error::EngineError>(())
    /// ```
    pub fn new(status: PayeeStatus, payer: Option<PayerCategory>) -> EngineResult<Self> {
        match (status, payer) {
            (PayeeStatus::Resident, Some(payer)) => Ok(PayeeProfile::Resident { payer }),
            (PayeeStatus::Resident, None) => Err(EngineError::MissingPayerCategory),
            (PayeeStatus::NonResident, _) => Ok(PayeeProfile::NonResident),
        }
    }

    /// The payee's residency.
    pub fn status(self) -> PayeeStatus {
        match self {
            PayeeProfile::Resident { .. } => PayeeStatus::Resident,
            PayeeProfile::NonResident => PayeeStatus::NonResident,
        }
    }

    /// The payer category, if the payee is resident.
    pub fn payer(self) -> Option<PayerCategory> {
        match self {
            PayeeProfile::Resident { payer } => Some(payer),
            PayeeProfile::NonResident => None,
        }
    }
}

/// Whether the payee has filed the returns required of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilerStatus {
    /// Returns have been filed.
    #[default]
    Filer,
    /// Returns have not been filed; higher or tiered rates may apply.
    NonFiler,
}

impl FilerStatus {
    /// A stable name for logs and audit output.
    pub fn as_str(self) -> &'static str {
        match self {
            FilerStatus::Filer => "filer",
            FilerStatus::NonFiler => "non-filer",
        }
    }
}

/// Rule-specific inputs passed alongside the rule and amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComputeOptions {
    /// The payee's filer status. Only meaningful for rules whose formula
    /// depends on it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filer_status: Option<FilerStatus>,
}

impl ComputeOptions {
    /// Options carrying the given filer status.
    pub fn with_filer_status(filer_status: FilerStatus) -> Self {
        Self {
            filer_status: Some(filer_status),
        }
    }
}
