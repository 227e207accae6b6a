//! Statutory rule model.
//!
//! A [`TdsRule`] describes one withholding provision: who it applies to, the
//! threshold below which nothing is withheld, the rate, and which formula
//! shape the engine must use once the threshold is crossed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayeeStatus, PayerCategory};

/// How a rule's `rate` is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    /// The rate is a percentage of the taxable amount.
    #[default]
    #[serde(alias = "%")]
    Percentage,
    /// The rate is a flat amount in rupees.
    Fixed,
}

/// The payer categories a resident rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayerType {
    /// Only payers who are specified persons.
    Specified,
    /// Only payers who are not specified persons.
    NonSpecified,
    /// Any payer.
    All,
}

impl PayerType {
    /// Returns true if a payer of the given category falls under this rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use tds_engine::models::{PayerCategory, PayerType};
    ///
    /// assert!(PayerType::All.admits(PayerCategory::NonSpecified));
    /// assert!(!PayerType::Specified.admits(PayerCategory::NonSpecified));
    /// ```
    pub fn admits(self, category: PayerCategory) -> bool {
        match self {
            PayerType::All => true,
            PayerType::Specified => category == PayerCategory::Specified,
            PayerType::NonSpecified => category == PayerCategory::NonSpecified,
        }
    }
}

/// The computation shape applied once a rule's threshold is crossed.
///
/// Most provisions tax the full amount. A few tax only the excess over a
/// statutory base, or use tiered rates that depend on the payee's filing
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaKind {
    /// `amount * rate / 100` on the full amount.
    #[default]
    Standard,
    /// High-value cash withdrawal: 2% over ₹1 crore for filers, tiered
    /// 2%/5% from ₹20 lakh for non-filers.
    TieredCashWithdrawal,
    /// Purchase of goods: rate applied to the excess over ₹50 lakh.
    GoodsPurchaseExcess,
    /// Long-term capital gains: rate applied to the excess over ₹1,25,000.
    CapitalGainsExcess,
}

impl FormulaKind {
    /// Returns true if the formula depends on the payee's filer status.
    pub fn uses_filer_status(self) -> bool {
        matches!(self, FormulaKind::TieredCashWithdrawal)
    }

    /// A stable name for logs and audit output.
    pub fn as_str(self) -> &'static str {
        match self {
            FormulaKind::Standard => "standard",
            FormulaKind::TieredCashWithdrawal => "tiered_cash_withdrawal",
            FormulaKind::GoodsPurchaseExcess => "goods_purchase_excess",
            FormulaKind::CapitalGainsExcess => "capital_gains_excess",
        }
    }
}

/// A single statutory withholding provision.
///
/// Rules are created when the catalog loads and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsRule {
    /// Unique, stable key.
    pub id: String,
    /// Grouping label used by pickers.
    pub category: String,
    /// Human-readable description of the payment.
    pub description: String,
    /// The withholding rate. Complex rules carry `0` as a placeholder.
    pub rate: Decimal,
    /// Unit of `rate`.
    #[serde(default)]
    pub rate_unit: RateUnit,
    /// Amounts at or below this floor attract no withholding.
    pub threshold: Decimal,
    /// Statutory citation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// How the threshold is applied, e.g. "per transaction".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_note: Option<String>,
    /// Free-text caveat shown alongside the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_note: Option<String>,
    /// The withholding cannot be expressed as threshold/rate and is described
    /// by `special_note` instead.
    #[serde(default)]
    pub is_complex: bool,
    /// Payer categories this rule applies to. Ignored for non-residents.
    pub payer_type: PayerType,
    /// Residency of the payee this rule applies to.
    pub payee_type: PayeeStatus,
    /// The computation shape once the threshold is crossed.
    #[serde(default)]
    pub formula: FormulaKind,
}

impl TdsRule {
    /// Returns true if the rule applies to a resident payee paid by a payer
    /// of the given category, or to a non-resident payee when `payer` is
    /// `None`.
    pub fn applies_to(&self, payee: PayeeStatus, payer: Option<PayerCategory>) -> bool {
        if self.payee_type != payee {
            return false;
        }
        match (payee, payer) {
            (PayeeStatus::NonResident, _) => true,
            (PayeeStatus::Resident, Some(category)) => self.payer_type.admits(category),
            (PayeeStatus::Resident, None) => false,
        }
    }
}
