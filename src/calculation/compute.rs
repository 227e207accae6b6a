//! TDS computation for a resolved rule.
//!
//! [`compute`] applies the threshold gate and then the rule's formula.
//! [`calculate`] is the full pipeline: it resolves the selected rule against
//! the applicable set first, so stale selections never reach the formulas.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::RuleCatalog;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Amount, AuditStep, CalculationInput, CalculationResult, ComputeOptions, FilerStatus,
    FormulaKind, Outcome, TdsRule,
};

use super::applicability::find_applicable_rule;
use super::cash_withdrawal::{cash_withdrawal_deduction, cash_withdrawal_threshold};
use super::excess_only::excess_deduction;
use super::standard::standard_deduction;
use super::statutory::{FIFTY_LAKH, LTCG_EXEMPTION_LIMIT};

/// The withholding a formula produced, with a line explaining the arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    /// Tax to withhold.
    pub tds_amount: Decimal,
    /// Human-readable arithmetic.
    pub reasoning: String,
}

/// Computes TDS for an amount under a resolved rule.
///
/// The steps are:
/// 1. Complex rules are not computed: the result carries zero tax, is marked
///    above threshold, and surfaces the rule's note as a descriptive outcome.
/// 2. Amounts at or below the effective threshold are exempt.
/// 3. Otherwise the rule's [`FormulaKind`] decides the tax.
///
/// `payable_amount` is always `amount - tds_amount`.
///
/// # Errors
///
/// Returns `FilerStatusNotApplicable` if `options` carries a filer status
/// for a rule whose formula does not depend on one, and `InvalidAmount` if
/// the amount is too large for the formula's arithmetic.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tds_engine::calculation::{compute, find_rule_by_id};
/// use tds_engine::config::RuleCatalog;
/// use tds_engine::models::{ComputeOptions, FilerStatus};
///
/// let catalog = RuleCatalog::builtin()?;
/// let rule = find_rule_by_id(&catalog, "cash_withdrawal").unwrap();
///
/// let result = compute(
///     rule,
///     "5000000".parse()?,
///     ComputeOptions::with_filer_status(FilerStatus::NonFiler),
/// )?;
/// assert_eq!(result.tds_amount, Decimal::from(60_000));
/// assert_eq!(result.effective_threshold, Decimal::from(2_000_000));
/// # Ok::<(), tds_engine::error::EngineError>(())
/// ```
pub fn compute(
    rule: &TdsRule,
    amount: Amount,
    options: ComputeOptions,
) -> EngineResult<CalculationResult> {
    if options.filer_status.is_some() && !rule.formula.uses_filer_status() {
        return Err(EngineError::FilerStatusNotApplicable {
            rule_id: rule.id.clone(),
        });
    }

    let filer_status = options.filer_status.unwrap_or_default();
    let value = amount.value();

    if rule.is_complex {
        debug!(rule_id = %rule.id, "Complex rule; no formula applied");
        return Ok(build_result(
            rule,
            value,
            filer_status,
            Decimal::ZERO,
            true,
            rule.threshold,
            Outcome::Descriptive {
                note: rule.special_note.clone(),
            },
            "Withholding under this provision is not a threshold/rate calculation; see the rule's note"
                .to_string(),
        ));
    }

    let effective_threshold = match rule.formula {
        FormulaKind::TieredCashWithdrawal => cash_withdrawal_threshold(rule, filer_status),
        FormulaKind::Standard
        | FormulaKind::GoodsPurchaseExcess
        | FormulaKind::CapitalGainsExcess => rule.threshold,
    };

    if value <= effective_threshold {
        debug!(
            rule_id = %rule.id,
            amount = %value,
            threshold = %effective_threshold,
            "Amount within threshold"
        );
        return Ok(build_result(
            rule,
            value,
            filer_status,
            Decimal::ZERO,
            false,
            effective_threshold,
            Outcome::Exempt,
            format!(
                "₹{} does not exceed the threshold of ₹{}; no tax deducted",
                value.normalize(),
                effective_threshold.normalize()
            ),
        ));
    }

    let deduction = match rule.formula {
        FormulaKind::Standard => standard_deduction(rule, value),
        FormulaKind::TieredCashWithdrawal => cash_withdrawal_deduction(value, filer_status),
        FormulaKind::GoodsPurchaseExcess => excess_deduction(rule, value, FIFTY_LAKH),
        FormulaKind::CapitalGainsExcess => excess_deduction(rule, value, LTCG_EXEMPTION_LIMIT),
    }?;

    debug!(
        rule_id = %rule.id,
        formula = rule.formula.as_str(),
        amount = %value,
        tds_amount = %deduction.tds_amount,
        "Formula applied"
    );

    Ok(build_result(
        rule,
        value,
        filer_status,
        deduction.tds_amount,
        true,
        effective_threshold,
        Outcome::Deducted,
        deduction.reasoning,
    ))
}

/// Resolves the selected rule and computes TDS for it.
///
/// # Errors
///
/// - `MissingPayerCategory` for a resident payee without a payer category
/// - `RuleNotFound` if the rule id is unknown or not applicable to the
///   payee/payer combination (a stale selection)
/// - `FilerStatusNotApplicable` and `InvalidAmount` as for [`compute`]
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tds_engine::calculation::calculate;
/// use tds_engine::config::RuleCatalog;
/// use tds_engine::models::{CalculationInput, PayeeStatus, PayerCategory};
///
/// let catalog = RuleCatalog::builtin()?;
/// let input = CalculationInput {
///     payee_status: PayeeStatus::Resident,
///     payer_category: Some(PayerCategory::Specified),
///     rule_id: "professional_fees".to_string(),
///     amount: "60000".parse()?,
///     filer_status: None,
/// };
///
/// let result = calculate(&catalog, &input)?;
/// assert_eq!(result.tds_amount, Decimal::from(6_000));
/// # Ok::<(), tds_engine::error::EngineError>(())
/// ```
pub fn calculate(
    catalog: &RuleCatalog,
    input: &CalculationInput,
) -> EngineResult<CalculationResult> {
    let profile = input.profile()?;

    let rule = find_applicable_rule(catalog, profile, &input.rule_id).ok_or_else(|| {
        warn!(
            rule_id = %input.rule_id,
            payee_status = profile.status().as_str(),
            payer_category = profile.payer().map(|p| p.as_str()),
            "Selected rule is not applicable"
        );
        EngineError::RuleNotFound {
            id: input.rule_id.clone(),
        }
    })?;

    let result = compute(rule, input.amount, input.options())?;

    info!(
        rule_id = %rule.id,
        amount = %input.amount,
        tds_amount = %result.tds_amount,
        is_above_threshold = result.is_above_threshold,
        "TDS calculated"
    );

    Ok(result)
}

#[allow(clippy::too_many_arguments)]
fn build_result(
    rule: &TdsRule,
    amount: Decimal,
    filer_status: FilerStatus,
    tds_amount: Decimal,
    is_above_threshold: bool,
    effective_threshold: Decimal,
    outcome: Outcome,
    reasoning: String,
) -> CalculationResult {
    let payable_amount = amount - tds_amount;

    let audit_step = AuditStep {
        rule_id: rule.id.clone(),
        formula: if rule.is_complex {
            "complex".to_string()
        } else {
            rule.formula.as_str().to_string()
        },
        reference: rule.reference.clone(),
        input: serde_json::json!({
            "amount": amount.normalize().to_string(),
            "rate": rule.rate.normalize().to_string(),
            "threshold": rule.threshold.normalize().to_string(),
            "filer_status": rule.formula.uses_filer_status().then(|| filer_status.as_str()),
        }),
        output: serde_json::json!({
            "tds_amount": tds_amount.normalize().to_string(),
            "payable_amount": payable_amount.normalize().to_string(),
            "is_above_threshold": is_above_threshold,
            "effective_threshold": effective_threshold.normalize().to_string(),
        }),
        reasoning,
    };

    CalculationResult {
        amount,
        tds_amount,
        payable_amount,
        rule_applied: rule.clone(),
        is_above_threshold,
        effective_threshold,
        outcome,
        audit_step,
    }
}
