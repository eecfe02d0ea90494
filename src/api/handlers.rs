use crate::api::AppState;
use crate::catalog::CustomerPage;
use crate::error::{AppError, Result};
use crate::ml::{FeatureImportance, PredictionResult};
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Predict churn for a single customer.
///
/// The body is a free-form JSON object mapping attribute names to raw
/// values; any subset of the schema fields is acceptable. Malformed bodies
/// and bad field values are client errors, never crashes.
pub async fn predict_churn(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResult>> {
    let Json(body) = payload
        .map_err(|e| AppError::InvalidInput(format!("malformed request body: {}", e)))?;

    let record = body.as_object().ok_or_else(|| {
        AppError::InvalidInput("request body must be a JSON object".to_string())
    })?;

    let result = state.context.prediction.predict(record)?;

    tracing::debug!(
        prediction = result.prediction,
        probability = result.probability,
        risk_level = %result.risk_level,
        "Prediction served"
    );

    Ok(Json(result))
}

/// Get analytics data for the dashboard
pub async fn get_analytics(State(state): State<AppState>) -> Result<Json<Value>> {
    let summary = state
        .context
        .aggregator
        .summarize(&state.context.dataset)
        .map_err(AppError::from)?;

    Ok(Json(serde_json::to_value(summary)?))
}

/// Get customer data with pagination
pub async fn get_customers(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListCustomersQuery>, QueryRejection>,
) -> Result<Json<CustomerPage>> {
    let Query(params) = params
        .map_err(|e| AppError::InvalidInput(format!("invalid query parameters: {}", e)))?;
    params.validate()?;

    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(10);

    let result = state.context.catalog.page(page, per_page)?;

    Ok(Json(result))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ListCustomersQuery {
    #[validate(range(min = 1))]
    pub page: Option<u32>,

    #[validate(range(min = 1))]
    pub per_page: Option<u32>,
}

/// Get feature importance from the model
pub async fn get_feature_importance(
    State(state): State<AppState>,
) -> Result<Json<FeatureImportanceResponse>> {
    let feature_importance = state.context.prediction.feature_importances()?;

    Ok(Json(FeatureImportanceResponse { feature_importance }))
}

#[derive(Debug, Serialize)]
pub struct FeatureImportanceResponse {
    pub feature_importance: Vec<FeatureImportance>,
}
