//! HTTP request handlers for the TDS engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate, filter_applicable_rules, find_rule_by_id, group_by_category};
use crate::error::EngineError;
use crate::models::PayeeProfile;

use super::request::{CalculationRequest, RulesQuery};
use super::response::{ApiError, ApiErrorResponse, RulesResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/rules", get(list_rules_handler))
        .route("/rules/:id", get(get_rule_handler))
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for GET /rules.
///
/// Lists the rules applicable to the payee status and payer category given
/// in the query string, sorted and grouped by category.
async fn list_rules_handler(
    State(state): State<AppState>,
    query: Result<Query<RulesQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid rules query"
            );
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };

    let profile = match PayeeProfile::new(query.payee_status, query.payer_category) {
        Ok(profile) => profile,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let catalog = state.catalog();
    let rules = filter_applicable_rules(catalog, profile);
    let groups = group_by_category(&rules);

    info!(
        correlation_id = %correlation_id,
        payee_status = profile.status().as_str(),
        payer_category = profile.payer().map(|p| p.as_str()),
        rules_count = rules.len(),
        "Listed applicable rules"
    );

    json_response(
        StatusCode::OK,
        RulesResponse {
            catalog: catalog.metadata(),
            payee_status: profile.status(),
            payer_category: profile.payer(),
            rules,
            groups,
        },
    )
}

/// Handler for GET /rules/:id.
async fn get_rule_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match find_rule_by_id(state.catalog(), &id) {
        Some(rule) => json_response(StatusCode::OK, rule),
        None => engine_error_response(Uuid::new_v4(), EngineError::RuleNotFound { id }),
    }
}

/// Handler for POST /calculate.
///
/// Accepts a calculation request and returns the TDS result for the selected
/// rule, or a structured error.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                json_rejection_error(correlation_id, rejection),
            );
        }
    };

    let input = match request.into_input() {
        Ok(input) => input,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    match calculate(state.catalog(), &input) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                rule_id = %result.rule_applied.id,
                tds_amount = %result.tds_amount,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Maps a JSON body rejection to an API error.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
