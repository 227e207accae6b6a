//! Request types for the TDS engine API.
//!
//! This module defines the query and JSON body structures accepted by the
//! `/rules` and `/calculate` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::{Amount, CalculationInput, FilerStatus, PayeeStatus, PayerCategory};

/// Query string for `GET /rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesQuery {
    /// Residency of the payee.
    pub payee_status: PayeeStatus,
    /// The payer's category. Required when the payee is resident.
    #[serde(default)]
    pub payer_category: Option<PayerCategory>,
}

/// Request body for `POST /calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Residency of the payee.
    pub payee_status: PayeeStatus,
    /// The payer's category. Required when the payee is resident.
    #[serde(default)]
    pub payer_category: Option<PayerCategory>,
    /// The selected rule id.
    pub rule_id: String,
    /// The gross payment amount, as a JSON number or numeric string.
    /// Validated by [`CalculationRequest::into_input`].
    pub amount: Value,
    /// The payee's filer status, only for rules that depend on it.
    #[serde(default)]
    pub filer_status: Option<FilerStatus>,
}

impl CalculationRequest {
    /// Validates the request into engine input.
    ///
    /// The amount must be strictly positive: a zero payment is rejected here,
    /// as the calculator form does, even though the engine itself would treat
    /// it as exempt.
    pub fn into_input(self) -> EngineResult<CalculationInput> {
        let amount = parse_amount(&self.amount)?;
        if amount.is_zero() {
            return Err(EngineError::InvalidAmount {
                message: "amount must be greater than zero".to_string(),
            });
        }

        Ok(CalculationInput {
            payee_status: self.payee_status,
            payer_category: self.payer_category,
            rule_id: self.rule_id,
            amount,
            filer_status: self.filer_status,
        })
    }
}

fn parse_amount(raw: &Value) -> EngineResult<Amount> {
    match raw {
        Value::String(text) => text.parse(),
        // Exponent notation has no exact decimal parse; fall back to f64.
        Value::Number(number) => {
            number
                .to_string()
                .parse()
                .or_else(|err| match number.as_f64() {
                    Some(value) => Amount::from_f64(value),
                    None => Err(err),
                })
        }
        Value::Null => Err(EngineError::InvalidAmount {
            message: "amount is required".to_string(),
        }),
        other => Err(EngineError::InvalidAmount {
            message: format!("{} is not a number", other),
        }),
    }
}
