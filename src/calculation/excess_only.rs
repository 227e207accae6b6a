//! Withholding on the excess over a statutory base.
//!
//! Goods purchases are taxed only above ₹50 lakh and listed-equity long-term
//! capital gains only above ₹1,25,000, in both cases at the rule's own rate.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::TdsRule;

use super::compute::Deduction;
use super::statutory::{excess_over, percent_of};

/// Computes withholding on the part of `amount` above `base`.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tds_engine::calculation::{FIFTY_LAKH, excess_deduction, find_rule_by_id};
/// use tds_engine::config::RuleCatalog;
///
/// let catalog = RuleCatalog::builtin()?;
/// let rule = find_rule_by_id(&catalog, "purchase_of_goods").unwrap();
///
/// let deduction = excess_deduction(rule, Decimal::from(6_000_000), FIFTY_LAKH)?;
/// assert_eq!(deduction.tds_amount, Decimal::from(1_000));
/// # Ok::<(), tds_engine::error::EngineError>(())
/// ```
pub fn excess_deduction(rule: &TdsRule, amount: Decimal, base: i64) -> EngineResult<Deduction> {
    let excess = excess_over(amount, base);
    let tds_amount = percent_of(excess, rule.rate)?;

    Ok(Deduction {
        tds_amount,
        reasoning: format!(
            "(₹{} - ₹{}) x {}% = ₹{}",
            amount.normalize(),
            base,
            rule.rate.normalize(),
            tds_amount.normalize()
        ),
    })
}
