//! Validated payment amounts.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A finite, non-negative payment amount in rupees.
///
/// The engine only accepts amounts of this type, so an amount that has no
/// meaningful tax answer (negative, NaN, non-numeric) is rejected before any
/// computation starts.
///
/// # Examples
///
/// ```
/// use tds_engine::models::Amount;
///
/// let amount: Amount = "60000".parse()?;
/// assert_eq!(amount.value().to_string(), "60000");
///
/// assert!("-5".parse::<Amount>().is_err());
/// assert!("abc".parse::<Amount>().is_err());
/// # Ok::<(), tds_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Validates a decimal amount.
    pub fn new(value: Decimal) -> EngineResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(EngineError::InvalidAmount {
                message: format!("{} must not be negative", value),
            });
        }
        Ok(Self(value))
    }

    /// Validates a floating point amount, rejecting NaN and infinities.
    pub fn from_f64(value: f64) -> EngineResult<Self> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount {
                message: format!("{} is not a finite number", value),
            });
        }
        let decimal = Decimal::from_f64(value).ok_or_else(|| EngineError::InvalidAmount {
            message: format!("{} is out of range", value),
        })?;
        Self::new(decimal)
    }

    /// The amount as a decimal.
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Returns true for a zero amount.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount {
                message: "amount is required".to_string(),
            });
        }
        let value = Decimal::from_str(trimmed).map_err(|_| EngineError::InvalidAmount {
            message: format!("'{}' is not a number", trimmed),
        })?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = EngineError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
