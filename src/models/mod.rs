//! Core data models for the TDS engine.
//!
//! This module contains all the domain models used throughout the engine.

mod amount;
mod calculation_input;
mod calculation_result;
mod party;
mod rule;

pub use amount::Amount;
pub use calculation_input::CalculationInput;
pub use calculation_result::{AuditStep, CalculationResult, Outcome};
pub use party::{ComputeOptions, FilerStatus, PayeeProfile, PayeeStatus, PayerCategory};
pub use rule::{FormulaKind, PayerType, RateUnit, TdsRule};
