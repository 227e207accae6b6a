//! Fixed statutory amounts used by the non-standard formulas.
//!
//! These figures come from the statute itself. Some of them deliberately
//! differ from the `threshold` a rule carries in the catalog, so they must
//! never be derived from it.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// ₹1 crore. Filers pay cash-withdrawal TDS only above this.
pub const ONE_CRORE: i64 = 10_000_000;

/// ₹20 lakh. Non-filers pay cash-withdrawal TDS above this.
pub const TWENTY_LAKH: i64 = 2_000_000;

/// ₹50 lakh. Goods-purchase TDS applies only to the excess over this.
pub const FIFTY_LAKH: i64 = 5_000_000;

/// ₹1,25,000. Exempt slice of long-term capital gains on listed equity.
pub const LTCG_EXEMPTION_LIMIT: i64 = 125_000;

/// Cash-withdrawal rate in percent: filers, and non-filers up to ₹1 crore.
pub const CASH_WITHDRAWAL_RATE: i64 = 2;

/// Cash-withdrawal rate in percent for non-filers above ₹1 crore.
pub const CASH_WITHDRAWAL_NON_FILER_HIGHER_RATE: i64 = 5;

/// Applies a percentage rate to an amount.
///
/// Returns `InvalidAmount` when `amount * rate` does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tds_engine::calculation::percent_of;
///
/// assert_eq!(percent_of(Decimal::from(60_000), Decimal::from(10))?, Decimal::from(6_000));
/// assert!(percent_of(Decimal::MAX, Decimal::from(10)).is_err());
/// # Ok::<(), tds_engine::error::EngineError>(())
/// ```
pub fn percent_of(amount: Decimal, rate: Decimal) -> EngineResult<Decimal> {
    amount
        .checked_mul(rate)
        .map(|product| product / Decimal::ONE_HUNDRED)
        .ok_or_else(|| EngineError::InvalidAmount {
            message: format!("{} is too large to compute tax on", amount.normalize()),
        })
}

/// The part of `amount` above `base`, never below zero.
pub fn excess_over(amount: Decimal, base: i64) -> Decimal {
    (amount - Decimal::from(base)).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_constants_match_indian_numbering() {
        assert_eq!(ONE_CRORE, 100 * 100_000);
        assert_eq!(TWENTY_LAKH, 20 * 100_000);
        assert_eq!(FIFTY_LAKH, 50 * 100_000);
    }

    #[test]
    fn test_percent_of_fractional_rate() {
        assert_eq!(percent_of(dec("1000000"), dec("0.1")).unwrap(), dec("1000"));
    }

    #[test]
    fn test_percent_of_overflow_is_an_error() {
        let result = percent_of(Decimal::MAX, dec("10"));
        assert!(matches!(result, Err(EngineError::InvalidAmount { .. })));
    }

    #[test]
    fn test_percent_of_rate_below_one_at_max_amount() {
        assert!(percent_of(Decimal::MAX, dec("0.1")).is_ok());
    }

    #[test]
    fn test_excess_over_clamps_at_zero() {
        assert_eq!(excess_over(dec("6000000"), FIFTY_LAKH), dec("1000000"));
        assert_eq!(excess_over(dec("4000000"), FIFTY_LAKH), Decimal::ZERO);
    }
}
