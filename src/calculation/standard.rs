//! Standard withholding: the rate applied to the full amount.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{RateUnit, TdsRule};

use super::compute::Deduction;
use super::statutory::percent_of;

/// Computes withholding on the full amount once the threshold is crossed.
///
/// Percentage rules withhold `amount * rate / 100`. Fixed-rate rules withhold
/// the flat `rate`, never more than the amount itself.
///
/// Fails with `InvalidAmount` if the product overflows.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tds_engine::calculation::{find_rule_by_id, standard_deduction};
/// use tds_engine::config::RuleCatalog;
///
/// let catalog = RuleCatalog::builtin()?;
/// let rule = find_rule_by_id(&catalog, "professional_fees").unwrap();
///
/// let deduction = standard_deduction(rule, Decimal::from(60_000))?;
/// assert_eq!(deduction.tds_amount, Decimal::from(6_000));
/// # Ok::<(), tds_engine::error::EngineError>(())
/// ```
pub fn standard_deduction(rule: &TdsRule, amount: Decimal) -> EngineResult<Deduction> {
    let deduction = match rule.rate_unit {
        RateUnit::Percentage => {
            let tds_amount = percent_of(amount, rule.rate)?;
            Deduction {
                tds_amount,
                reasoning: format!(
                    "₹{} x {}% = ₹{}",
                    amount.normalize(),
                    rule.rate.normalize(),
                    tds_amount.normalize()
                ),
            }
        }
        RateUnit::Fixed => {
            let tds_amount = rule.rate.min(amount);
            Deduction {
                tds_amount,
                reasoning: format!(
                    "Flat levy of ₹{} on ₹{} = ₹{}",
                    rule.rate.normalize(),
                    amount.normalize(),
                    tds_amount.normalize()
                ),
            }
        }
    };

    Ok(deduction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FormulaKind, PayeeStatus, PayerType};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_rule(rate: &str, rate_unit: RateUnit) -> TdsRule {
        TdsRule {
            id: "test_rule".to_string(),
            category: "Test".to_string(),
            description: "Test rule".to_string(),
            rate: dec(rate),
            rate_unit,
            threshold: dec("30000"),
            reference: None,
            threshold_note: None,
            special_note: None,
            is_complex: false,
            payer_type: PayerType::All,
            payee_type: PayeeStatus::Resident,
            formula: FormulaKind::Standard,
        }
    }

    #[test]
    fn test_percentage_taxes_full_amount() {
        let rule = create_rule("1", RateUnit::Percentage);
        let deduction = standard_deduction(&rule, dec("40000")).unwrap();

        assert_eq!(deduction.tds_amount, dec("400"));
        assert_eq!(deduction.reasoning, "₹40000 x 1% = ₹400");
    }

    #[test]
    fn test_fractional_rate() {
        let rule = create_rule("0.1", RateUnit::Percentage);
        let deduction = standard_deduction(&rule, dec("600000")).unwrap();

        assert_eq!(deduction.tds_amount, dec("600"));
    }

    #[test]
    fn test_fixed_rate_is_flat() {
        let rule = create_rule("500", RateUnit::Fixed);
        let deduction = standard_deduction(&rule, dec("40000")).unwrap();

        assert_eq!(deduction.tds_amount, dec("500"));
        assert!(deduction.reasoning.contains("Flat levy"));
    }

    #[test]
    fn test_fixed_rate_never_exceeds_amount() {
        let rule = create_rule("500", RateUnit::Fixed);
        let deduction = standard_deduction(&rule, dec("300")).unwrap();

        assert_eq!(deduction.tds_amount, dec("300"));
    }
}
