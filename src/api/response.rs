//! Response types for the TDS engine API.
//!
//! This module defines the rule listing body, the error response structures,
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::RuleGroup;
use crate::config::CatalogMetadata;
use crate::error::EngineError;
use crate::models::{PayeeStatus, PayerCategory, TdsRule};

/// Response body for `GET /rules`.
#[derive(Debug, Serialize)]
pub struct RulesResponse<'a> {
    /// The catalog the rules come from.
    pub catalog: &'a CatalogMetadata,
    /// The payee status the rules were filtered for.
    pub payee_status: PayeeStatus,
    /// The payer category the rules were filtered for, if resident.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_category: Option<PayerCategory>,
    /// Applicable rules sorted by category, then description.
    pub rules: Vec<&'a TdsRule>,
    /// The same rules grouped by category.
    pub groups: Vec<RuleGroup<'a>>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a rule not found error response.
    pub fn rule_not_found(id: &str) -> Self {
        Self::with_details(
            "RULE_NOT_FOUND",
            format!("Rule not found: {}", id),
            format!(
                "The rule '{}' does not exist or does not apply to this payee and payer; select a rule again",
                id
            ),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidCatalog { rule_id, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid rule catalog",
                    format!("Rule '{}': {}", rule_id, message),
                ),
            },
            EngineError::InvalidAmount { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_AMOUNT",
                    format!("Invalid amount: {}", message),
                    "Enter a positive amount in rupees",
                ),
            },
            EngineError::MissingPayerCategory => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MISSING_PAYER_CATEGORY",
                    "Payer category is required for a resident payee",
                    "Use payer_category 'specified' or 'non-specified'",
                ),
            },
            EngineError::RuleNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::rule_not_found(&id),
            },
            EngineError::FilerStatusNotApplicable { rule_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "FILER_STATUS_NOT_APPLICABLE",
                    format!("Filer status does not apply to rule '{}'", rule_id),
                    "Omit filer_status for this rule",
                ),
            },
        }
    }
}
