//! Error types for the TDS engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition the catalog loader and the engine can report.

use thiserror::Error;

/// The main error type for the TDS engine.
///
/// All fallible operations return this error type, so callers can match on
/// the variant to decide how to present the failure.
///
/// # Example
///
/// ```
/// use tds_engine::error::EngineError;
///
/// let error = EngineError::RuleNotFound {
///     id: "unknown_rule".to_string(),
/// };
/// assert_eq!(error.to_string(), "Rule not found: unknown_rule");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Catalog file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Catalog file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The catalog parsed but breaks one of its invariants.
    #[error("Invalid catalog entry '{rule_id}': {message}")]
    InvalidCatalog {
        /// The id of the offending rule.
        rule_id: String,
        /// What was wrong with it.
        message: String,
    },

    /// The payment amount is missing, non-numeric, non-finite or negative.
    #[error("Invalid amount: {message}")]
    InvalidAmount {
        /// A description of why the amount was rejected.
        message: String,
    },

    /// A resident payee was given without a payer category.
    #[error("Payer category is required for a resident payee")]
    MissingPayerCategory,

    /// No rule with this id exists, or it is not applicable to the selection.
    #[error("Rule not found: {id}")]
    RuleNotFound {
        /// The id that could not be resolved.
        id: String,
    },

    /// A filer status was supplied for a rule whose formula ignores it.
    #[error("Filer status does not apply to rule '{rule_id}'")]
    FilerStatusNotApplicable {
        /// The id of the rule the status was supplied for.
        rule_id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
