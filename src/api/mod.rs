//! HTTP API module for the TDS engine.
//!
//! This module provides the REST endpoints for listing applicable rules and
//! calculating TDS on a payment.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, RulesQuery};
pub use response::{ApiError, ApiErrorResponse, RulesResponse};
pub use state::AppState;
