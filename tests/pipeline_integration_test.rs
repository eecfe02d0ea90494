//! End-to-end tests of the inference pipeline: artifacts on disk through
//! startup loading, payload assembly, scaling, scoring, and risk tiering.

mod common;

use churn_insight::ml::RiskLevel;
use serde_json::{json, Map, Value};

fn payload(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_full_payload_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let context = common::test_context(dir.path());

    let record = payload(json!({
        "Age": 61,
        "Gender": "M",
        "MaritalStatus": "Married",
        "IncomeLevel": "High",
        "MonthlyCharges": 110.0,
        "Tenure": 48,
        "TotalCharges": 5280.0,
        "Contract": "Two year",
        "InternetService": "Fiber optic",
        "OnlineSecurity": "Yes",
        "TechSupport": "Yes",
        "PaymentMethod": "Credit card"
    }));

    let result = context.prediction.predict(&record).unwrap();

    // Age 61 is above the scaler mean, so the stump routes right
    assert_eq!(result.prediction, 1);
    assert!(result.probability > 0.7);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn test_partial_payload_uses_zero_for_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let context = common::test_context(dir.path());

    // Only Age provided; every other field defaults to raw 0
    let young = context.prediction.predict(&payload(json!({"Age": 30}))).unwrap();
    assert_eq!(young.prediction, 0);
    assert_eq!(young.risk_level, RiskLevel::Low);

    let old = context.prediction.predict(&payload(json!({"Age": 60}))).unwrap();
    assert_eq!(old.prediction, 1);
    assert_eq!(old.risk_level, RiskLevel::High);
}

#[test]
fn test_numeric_strings_are_coerced() {
    let dir = tempfile::tempdir().unwrap();
    let context = common::test_context(dir.path());

    let from_string = context
        .prediction
        .predict(&payload(json!({"Age": "60"})))
        .unwrap();
    let from_number = context
        .prediction
        .predict(&payload(json!({"Age": 60})))
        .unwrap();

    assert_eq!(from_string.probability, from_number.probability);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let context = common::test_context(dir.path());

    let plain = context.prediction.predict(&payload(json!({"Age": 60}))).unwrap();
    let noisy = context
        .prediction
        .predict(&payload(json!({"Age": 60, "FavoriteColor": "teal"})))
        .unwrap();

    assert_eq!(plain.probability, noisy.probability);
}

#[test]
fn test_unknown_categorical_label_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let context = common::test_context(dir.path());

    let err = context
        .prediction
        .predict(&payload(json!({"Gender": "X"})))
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[test]
fn test_non_numeric_value_for_numeric_field_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let context = common::test_context(dir.path());

    let err = context
        .prediction
        .predict(&payload(json!({"Age": "forty"})))
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[test]
fn test_feature_importances_sorted_descending() {
    let dir = tempfile::tempdir().unwrap();
    let context = common::test_context(dir.path());

    let ranked = context.prediction.feature_importances().unwrap();

    assert_eq!(ranked.len(), 12);
    assert_eq!(ranked[0].feature, "Age");
    assert_eq!(ranked[1].feature, "MonthlyCharges");
    assert_eq!(ranked[2].feature, "Tenure");
    for pair in ranked.windows(2) {
        assert!(pair[0].importance >= pair[1].importance);
    }
}

#[test]
fn test_analytics_over_loaded_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let context = common::test_context(dir.path());

    let summary = context.aggregator.summarize(&context.dataset).unwrap();

    assert_eq!(summary.overview.total_customers, 5);
    assert_eq!(summary.overview.churned_customers, 2);
    assert!((summary.overview.churn_rate - 0.4).abs() < 1e-12);

    let contract = &summary.business_metrics.contract;
    assert_eq!(contract["Month-to-month"].count, 2);
    assert_eq!(contract["Month-to-month"].churn_rate, 1.0);

    let age = &summary.demographics.age_group;
    assert_eq!(age["25-34"].count, 2);
    assert_eq!(age["65+"].count, 1);
}

#[test]
fn test_catalog_pagination_over_loaded_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let context = common::test_context(dir.path());

    let page = context.catalog.page(2, 2).unwrap();
    assert_eq!(page.customers.len(), 2);
    assert_eq!(page.customers[0].customer_id, "C-003");
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);

    let past_end = context.catalog.page(9, 2).unwrap();
    assert!(past_end.customers.is_empty());
    assert_eq!(past_end.total, 5);
}
