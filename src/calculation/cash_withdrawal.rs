//! High-value cash withdrawal withholding.
//!
//! Filers pay 2% on withdrawals above ₹1 crore. Non-filers pay on a tiered
//! scale starting at ₹20 lakh: 2% up to ₹1 crore, 5% beyond it.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{FilerStatus, TdsRule};

use super::compute::Deduction;
use super::statutory::{
    CASH_WITHDRAWAL_NON_FILER_HIGHER_RATE, CASH_WITHDRAWAL_RATE, ONE_CRORE, TWENTY_LAKH,
    excess_over, percent_of,
};

/// The threshold the above-threshold gate compares against.
///
/// Filers use the catalog threshold. Non-filers use ₹20 lakh regardless of
/// what the catalog says.
// TODO: confirm the non-filer ₹20 lakh gate against the published rate chart.
pub fn cash_withdrawal_threshold(rule: &TdsRule, filer_status: FilerStatus) -> Decimal {
    match filer_status {
        FilerStatus::Filer => rule.threshold,
        FilerStatus::NonFiler => Decimal::from(TWENTY_LAKH),
    }
}

/// Computes cash-withdrawal withholding for an amount above the gate.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tds_engine::calculation::cash_withdrawal_deduction;
/// use tds_engine::models::FilerStatus;
///
/// let filer = cash_withdrawal_deduction(Decimal::from(15_000_000), FilerStatus::Filer)?;
/// assert_eq!(filer.tds_amount, Decimal::from(100_000));
///
/// let non_filer = cash_withdrawal_deduction(Decimal::from(15_000_000), FilerStatus::NonFiler)?;
/// assert_eq!(non_filer.tds_amount, Decimal::from(410_000));
/// # Ok::<(), tds_engine::error::EngineError>(())
/// ```
pub fn cash_withdrawal_deduction(
    amount: Decimal,
    filer_status: FilerStatus,
) -> EngineResult<Deduction> {
    let base_rate = Decimal::from(CASH_WITHDRAWAL_RATE);
    let one_crore = Decimal::from(ONE_CRORE);

    let deduction = match filer_status {
        FilerStatus::Filer => {
            let excess = excess_over(amount, ONE_CRORE);
            let tds_amount = percent_of(excess, base_rate)?;
            Deduction {
                tds_amount,
                reasoning: format!(
                    "Filer: (₹{} - ₹{}) x {}% = ₹{}",
                    amount.normalize(),
                    ONE_CRORE,
                    CASH_WITHDRAWAL_RATE,
                    tds_amount.normalize()
                ),
            }
        }
        FilerStatus::NonFiler if amount <= one_crore => {
            let excess = excess_over(amount, TWENTY_LAKH);
            let tds_amount = percent_of(excess, base_rate)?;
            Deduction {
                tds_amount,
                reasoning: format!(
                    "Non-filer: (₹{} - ₹{}) x {}% = ₹{}",
                    amount.normalize(),
                    TWENTY_LAKH,
                    CASH_WITHDRAWAL_RATE,
                    tds_amount.normalize()
                ),
            }
        }
        FilerStatus::NonFiler => {
            let lower_tier = percent_of(Decimal::from(ONE_CRORE - TWENTY_LAKH), base_rate)?;
            let upper_tier = percent_of(
                excess_over(amount, ONE_CRORE),
                Decimal::from(CASH_WITHDRAWAL_NON_FILER_HIGHER_RATE),
            )?;
            let tds_amount = lower_tier + upper_tier;
            Deduction {
                tds_amount,
                reasoning: format!(
                    "Non-filer: (₹{} x {}%) + (₹{} - ₹{}) x {}% = ₹{} + ₹{} = ₹{}",
                    ONE_CRORE - TWENTY_LAKH,
                    CASH_WITHDRAWAL_RATE,
                    amount.normalize(),
                    ONE_CRORE,
                    CASH_WITHDRAWAL_NON_FILER_HIGHER_RATE,
                    lower_tier.normalize(),
                    upper_tier.normalize(),
                    tds_amount.normalize()
                ),
            }
        }
    };

    Ok(deduction)
}
