//! Integration tests for the TDS engine HTTP API.
//!
//! This suite drives the router end to end against the built-in catalog:
//! - Rule listing and grouping per payee/payer combination
//! - Standard threshold/rate calculations
//! - Goods purchase and capital gains excess-only formulas
//! - Tiered cash withdrawal for filers and non-filers
//! - Complex (descriptive) rules
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use tds_engine::api::{AppState, create_router};
use tds_engine::config::RuleCatalog;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let catalog = RuleCatalog::load("./config/tds_rules.yaml").expect("Failed to load catalog");
    create_router(AppState::new(catalog))
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_calculate(body: Value) -> (StatusCode, Value) {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let response = create_router_for_test()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

fn resident_request(payer: &str, rule_id: &str, amount: &str) -> Value {
    json!({
        "payee_status": "resident",
        "payer_category": payer,
        "rule_id": rule_id,
        "amount": amount
    })
}

fn non_resident_request(rule_id: &str, amount: &str) -> Value {
    json!({
        "payee_status": "non-resident",
        "rule_id": rule_id,
        "amount": amount
    })
}

fn assert_decimal_field(result: &Value, field: &str, expected: &str) {
    let actual = result[field]
        .as_str()
        .unwrap_or_else(|| panic!("{} missing in {}", field, result));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

fn rule_ids(rules: &Value) -> Vec<&str> {
    rules
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Rule Listing
// =============================================================================

#[tokio::test]
async fn test_resident_specified_listing() {
    let (status, json) =
        get_json("/rules?payee_status=resident&payer_category=specified").await;
    assert_eq!(status, StatusCode::OK);

    let ids = rule_ids(&json["rules"]);
    assert!(ids.contains(&"professional_fees"));
    assert!(ids.contains(&"cash_withdrawal"));
    assert!(!ids.contains(&"rent_individual_huf"));
    assert!(!ids.iter().any(|id| id.starts_with("nr_")));
    assert_eq!(json["payer_category"], "specified");
}

#[tokio::test]
async fn test_resident_non_specified_listing() {
    let (status, json) =
        get_json("/rules?payee_status=resident&payer_category=non-specified").await;
    assert_eq!(status, StatusCode::OK);

    let ids = rule_ids(&json["rules"]);
    assert!(ids.contains(&"rent_individual_huf"));
    assert!(ids.contains(&"salary"));
    assert!(!ids.contains(&"professional_fees"));
}

#[tokio::test]
async fn test_non_resident_listing_ignores_payer() {
    let (_, without_payer) = get_json("/rules?payee_status=non-resident").await;
    let (_, with_payer) =
        get_json("/rules?payee_status=non-resident&payer_category=specified").await;

    assert_eq!(without_payer["rules"], with_payer["rules"]);
    assert!(rule_ids(&without_payer["rules"]).contains(&"nr_ltcg_listed_equity"));
}

#[tokio::test]
async fn test_listing_is_sorted_by_category_then_description() {
    let (_, json) = get_json("/rules?payee_status=resident&payer_category=specified").await;

    let keys: Vec<(String, String)> = json["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            (
                r["category"].as_str().unwrap().to_string(),
                r["description"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[tokio::test]
async fn test_groups_partition_the_listing() {
    let (_, json) = get_json("/rules?payee_status=non-resident").await;

    let groups = json["groups"].as_array().unwrap();
    let grouped: usize = groups
        .iter()
        .map(|g| g["rules"].as_array().unwrap().len())
        .sum();
    assert_eq!(grouped, json["rules"].as_array().unwrap().len());

    for group in groups {
        let category = group["category"].as_str().unwrap();
        assert!(
            group["rules"]
                .as_array()
                .unwrap()
                .iter()
                .all(|r| r["category"] == category)
        );
    }
}

// =============================================================================
// Standard Calculations
// =============================================================================

#[tokio::test]
async fn test_professional_fees_above_threshold() {
    let (status, result) =
        post_calculate(resident_request("specified", "professional_fees", "60000")).await;
    assert_eq!(status, StatusCode::OK);

    assert_decimal_field(&result, "tds_amount", "6000");
    assert_decimal_field(&result, "payable_amount", "54000");
    assert_eq!(result["is_above_threshold"], true);
    assert_eq!(result["outcome"]["kind"], "deducted");
    assert_eq!(result["rule_applied"]["id"], "professional_fees");
}

#[tokio::test]
async fn test_amount_equal_to_threshold_is_exempt() {
    let (status, result) =
        post_calculate(resident_request("specified", "rent_land_building", "50000")).await;
    assert_eq!(status, StatusCode::OK);

    assert_decimal_field(&result, "tds_amount", "0");
    assert_decimal_field(&result, "payable_amount", "50000");
    assert_eq!(result["is_above_threshold"], false);
    assert_eq!(result["outcome"]["kind"], "exempt");
}

#[tokio::test]
async fn test_fractional_amount_is_exact() {
    let (_, result) =
        post_calculate(resident_request("specified", "contract_individual_huf", "30000.50")).await;

    assert_decimal_field(&result, "tds_amount", "300.005");
    assert_decimal_field(&result, "payable_amount", "29700.495");
}

#[tokio::test]
async fn test_zero_threshold_rule_deducts_on_any_amount() {
    let (_, result) = post_calculate(non_resident_request("nr_sportsperson", "1")).await;

    assert_decimal_field(&result, "tds_amount", "0.2");
    assert_eq!(result["is_above_threshold"], true);
}

// =============================================================================
// Excess-only Formulas
// =============================================================================

#[tokio::test]
async fn test_goods_purchase_taxes_only_the_excess() {
    let (_, result) =
        post_calculate(resident_request("specified", "purchase_of_goods", "6000000")).await;

    // (60,00,000 - 50,00,000) x 0.1%
    assert_decimal_field(&result, "tds_amount", "1000");
    assert_decimal_field(&result, "payable_amount", "5999000");
}

#[tokio::test]
async fn test_non_resident_ltcg_taxes_only_the_excess() {
    let (_, result) = post_calculate(non_resident_request("nr_ltcg_listed_equity", "225000")).await;

    // (2,25,000 - 1,25,000) x 12.5%
    assert_decimal_field(&result, "tds_amount", "12500");
}

#[tokio::test]
async fn test_ltcg_at_exemption_limit_is_exempt() {
    let (_, result) = post_calculate(non_resident_request("nr_ltcg_listed_equity", "125000")).await;

    assert_decimal_field(&result, "tds_amount", "0");
    assert_eq!(result["outcome"]["kind"], "exempt");
}

// =============================================================================
// Cash Withdrawal
// =============================================================================

#[tokio::test]
async fn test_cash_withdrawal_filer() {
    let mut request = resident_request("specified", "cash_withdrawal", "15000000");
    request["filer_status"] = json!("filer");

    let (status, result) = post_calculate(request).await;
    assert_eq!(status, StatusCode::OK);

    // (1.5 crore - 1 crore) x 2%
    assert_decimal_field(&result, "tds_amount", "100000");
    assert_decimal_field(&result, "effective_threshold", "10000000");
}

#[tokio::test]
async fn test_cash_withdrawal_defaults_to_filer() {
    let (_, result) =
        post_calculate(resident_request("non-specified", "cash_withdrawal", "5000000")).await;

    assert_decimal_field(&result, "tds_amount", "0");
    assert_eq!(result["is_above_threshold"], false);
}

#[tokio::test]
async fn test_cash_withdrawal_non_filer_below_one_crore() {
    let mut request = resident_request("specified", "cash_withdrawal", "5000000");
    request["filer_status"] = json!("non-filer");

    let (_, result) = post_calculate(request).await;

    // (50 lakh - 20 lakh) x 2%
    assert_decimal_field(&result, "tds_amount", "60000");
    assert_decimal_field(&result, "effective_threshold", "2000000");
}

#[tokio::test]
async fn test_cash_withdrawal_non_filer_above_one_crore() {
    let mut request = resident_request("specified", "cash_withdrawal", "15000000");
    request["filer_status"] = json!("non-filer");

    let (_, result) = post_calculate(request).await;

    // 80 lakh x 2% + 50 lakh x 5%
    assert_decimal_field(&result, "tds_amount", "410000");
    assert_decimal_field(&result, "payable_amount", "14590000");
}

// =============================================================================
// Complex Rules
// =============================================================================

#[tokio::test]
async fn test_salary_is_descriptive() {
    let (status, result) =
        post_calculate(resident_request("non-specified", "salary", "1200000")).await;
    assert_eq!(status, StatusCode::OK);

    assert_decimal_field(&result, "tds_amount", "0");
    assert_decimal_field(&result, "payable_amount", "1200000");
    assert_eq!(result["outcome"]["kind"], "descriptive");
    assert!(result["outcome"]["note"].as_str().is_some());
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_stale_selection_after_payer_change() {
    // professional_fees applies to specified payers only.
    let (status, error) =
        post_calculate(resident_request("non-specified", "professional_fees", "60000")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "RULE_NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_rule_returns_404() {
    let (status, error) = post_calculate(non_resident_request("no_such_rule", "100")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "RULE_NOT_FOUND");
}

#[tokio::test]
async fn test_negative_amount_returns_400() {
    let (status, error) =
        post_calculate(resident_request("specified", "professional_fees", "-1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_non_numeric_amount_returns_400() {
    let (status, error) =
        post_calculate(resident_request("specified", "professional_fees", "abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_boolean_amount_returns_invalid_amount() {
    let (status, error) = post_calculate(json!({
        "payee_status": "non-resident",
        "rule_id": "nr_interest",
        "amount": true
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_amount_too_large_to_compute_returns_400() {
    let (status, error) = post_calculate(resident_request(
        "specified",
        "professional_fees",
        "79228162514264337593543950335",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_filer_status_on_standard_rule_returns_400() {
    let mut request = resident_request("specified", "professional_fees", "60000");
    request["filer_status"] = json!("non-filer");

    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "FILER_STATUS_NOT_APPLICABLE");
}

#[tokio::test]
async fn test_unknown_payee_status_returns_validation_error() {
    let (status, error) = post_calculate(json!({
        "payee_status": "foreign",
        "rule_id": "nr_interest",
        "amount": "100"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}
