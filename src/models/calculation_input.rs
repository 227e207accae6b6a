//! The complete set of selections for one calculation.

use serde::{Deserialize, Serialize};

use super::{Amount, ComputeOptions, FilerStatus, PayeeProfile, PayeeStatus, PayerCategory};
use crate::error::EngineResult;

/// Everything a caller selects before asking for a TDS figure.
///
/// # Example
///
/// ```
/// use tds_engine::models::{CalculationInput, PayeeStatus, PayerCategory};
///
/// let input = CalculationInput {
///     payee_status: PayeeStatus::Resident,
///     payer_category: Some(PayerCategory::Specified),
///     rule_id: "professional_fees".to_string(),
///     amount: "60000".parse()?,
///     filer_status: None,
/// };
/// assert!(input.profile().is_ok());
/// # Ok::<(), tds_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Residency of the payee.
    pub payee_status: PayeeStatus,
    /// The payer's category. Required for resident payees.
    #[serde(default)]
    pub payer_category: Option<PayerCategory>,
    /// The selected rule.
    pub rule_id: String,
    /// The gross payment amount.
    pub amount: Amount,
    /// The payee's filer status, for rules that depend on it.
    #[serde(default)]
    pub filer_status: Option<FilerStatus>,
}

impl CalculationInput {
    /// The payee/payer combination the rule must be applicable to.
    pub fn profile(&self) -> EngineResult<PayeeProfile> {
        PayeeProfile::new(self.payee_status, self.payer_category)
    }

    /// The rule-specific options to compute with.
    pub fn options(&self) -> ComputeOptions {
        ComputeOptions {
            filer_status: self.filer_status,
        }
    }
}
