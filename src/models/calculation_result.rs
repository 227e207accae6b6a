//! Calculation result models for the TDS engine.
//!
//! This module contains the [`CalculationResult`] type returned by every
//! computation, along with the [`Outcome`] that tells a presentation layer
//! how to render it and the [`AuditStep`] explaining how it was reached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TdsRule;

/// How a result should be presented.
///
/// # Example
///
/// ```
/// use tds_engine::models::Outcome;
///
/// let outcome = Outcome::Exempt;
/// assert_eq!(serde_json::to_string(&outcome).unwrap(), r#"{"kind":"exempt"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The amount did not cross the threshold. Render as an exemption, not as
    /// a zero-tax calculation.
    Exempt,
    /// Tax was computed by formula.
    Deducted,
    /// The rule cannot be computed by formula; render the note instead of a
    /// numeric breakdown.
    Descriptive {
        /// The rule's explanation of how withholding is determined.
        note: Option<String>,
    },
}

/// A record of the decision the engine made for one computation.
///
/// Captures the input, output, and reasoning for the applied formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The id of the rule that was applied.
    pub rule_id: String,
    /// The formula that produced the result.
    pub formula: String,
    /// Statutory citation for the rule, when the catalog has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The result of a single TDS computation.
///
/// Created fresh for each request and owned by the caller; it has no
/// identity beyond its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The gross amount the computation was run on.
    pub amount: Decimal,
    /// Tax withheld.
    pub tds_amount: Decimal,
    /// Amount released to the payee (`amount - tds_amount`).
    pub payable_amount: Decimal,
    /// The rule the computation used.
    pub rule_applied: TdsRule,
    /// Whether the amount triggered withholding at all.
    pub is_above_threshold: bool,
    /// The threshold the gate actually compared against. Differs from the
    /// rule's catalog threshold when a non-filer override applies.
    pub effective_threshold: Decimal,
    /// How the result should be presented.
    pub outcome: Outcome,
    /// How the result was reached.
    pub audit_step: AuditStep,
}

impl CalculationResult {
    /// The compliance notes a presentation layer should show with the result.
    ///
    /// # Example
    ///
    /// ```
    /// use tds_engine::config::RuleCatalog;
    /// use tds_engine::calculation::{compute, find_rule_by_id};
    /// use tds_engine::models::{Amount, ComputeOptions};
    ///
    /// let catalog = RuleCatalog::builtin()?;
    /// let rule = find_rule_by_id(&catalog, "contract_individual_huf").unwrap();
    /// let result = compute(rule, "40000".parse::<Amount>()?, ComputeOptions::default())?;
    /// assert!(!result.compliance_notes().is_empty());
    /// # Ok::<(), tds_engine::error::EngineError>(())
    /// ```
    pub fn compliance_notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if let Some(threshold_note) = &self.rule_applied.threshold_note {
            notes.push(format!("Threshold applies {}.", threshold_note));
        }
        if let Some(special_note) = &self.rule_applied.special_note {
            notes.push(special_note.clone());
        }
        notes
    }
}
