use crate::error::{AppError, Result};
use crate::ml::encoder::CategoricalEncoder;
use crate::ml::model::ChurnModel;
use crate::ml::scaler::{NumericScaler, NUMERIC_FEATURES};
use crate::ml::schema::FeatureSchema;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::Display;

/// Coarse risk bucketing of the churn probability for dashboard display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Tier a churn probability.
    ///
    /// Thresholds are strict: exactly 0.7 is Medium and exactly 0.4 is Low.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 {
            RiskLevel::High
        } else if probability > 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Outcome of scoring one customer record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Binary churn label
    pub prediction: u8,

    /// Positive-class probability
    pub probability: f64,

    /// Risk tier derived from the probability
    pub risk_level: RiskLevel,
}

/// One entry of the feature-importance report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Scores arbitrary, possibly-incomplete customer payloads.
///
/// Composes the feature schema, categorical encoder, numeric scaler, and
/// trained model into a single `predict` operation that reproduces the
/// training-time feature representation exactly: fields outside the schema
/// are dropped, schema fields missing from the payload default to 0, and
/// only the fixed numeric features are scaled.
#[derive(Debug)]
pub struct PredictionService {
    schema: FeatureSchema,
    encoder: CategoricalEncoder,
    scaler: NumericScaler,
    model: ChurnModel,
}

impl PredictionService {
    pub fn new(
        schema: FeatureSchema,
        encoder: CategoricalEncoder,
        scaler: NumericScaler,
        model: ChurnModel,
    ) -> Self {
        Self {
            schema,
            encoder,
            scaler,
            model,
        }
    }

    /// Feature schema in model input order
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// The loaded model
    pub fn model(&self) -> &ChurnModel {
        &self.model
    }

    /// Score a customer payload
    pub fn predict(&self, record: &Map<String, Value>) -> Result<PredictionResult> {
        let features = self.feature_vector(record)?;

        let probability = self.model.predict_proba(&features)?;
        let prediction = self.model.predict(&features)?;

        Ok(PredictionResult {
            prediction,
            probability,
            risk_level: RiskLevel::from_probability(probability),
        })
    }

    /// Per-feature importances sorted descending, for models that expose them
    pub fn feature_importances(&self) -> Result<Vec<FeatureImportance>> {
        let importances = self.model.feature_importances().ok_or_else(|| {
            AppError::Unsupported("model does not support feature importance".to_string())
        })?;

        let mut report: Vec<FeatureImportance> = self
            .schema
            .names()
            .iter()
            .zip(importances.iter())
            .map(|(feature, importance)| FeatureImportance {
                feature: feature.clone(),
                importance: *importance,
            })
            .collect();

        report.sort_by(|a, b| b.importance.total_cmp(&a.importance));

        Ok(report)
    }

    /// Encoded feature vector in schema order, scaled and ready for scoring
    pub fn feature_vector(&self, record: &Map<String, Value>) -> Result<Array1<f64>> {
        let mut features = self.raw_feature_vector(record)?;

        for (idx, name) in self.schema.names().iter().enumerate() {
            if NUMERIC_FEATURES.contains(&name.as_str()) {
                features[idx] = self.scaler.scale(name, features[idx])?;
            }
        }

        Ok(features)
    }

    /// Encoded feature vector in schema order, prior to scaling.
    ///
    /// Schema fields absent from the record are filled with 0; record fields
    /// outside the schema are ignored.
    pub fn raw_feature_vector(&self, record: &Map<String, Value>) -> Result<Array1<f64>> {
        let mut features = Array1::zeros(self.schema.len());

        for (idx, name) in self.schema.names().iter().enumerate() {
            let Some(value) = record.get(name) else {
                continue;
            };

            features[idx] = if self.encoder.is_categorical(name) {
                let label = value.as_str().ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "field '{}' expects a categorical label string",
                        name
                    ))
                })?;
                self.encoder.encode(name, label)?
            } else {
                coerce_numeric(name, value)?
            };
        }

        Ok(features)
    }
}

/// Coerce a JSON value into a numeric feature value. Numbers pass through;
/// numeric strings are parsed; anything else is a client error.
fn coerce_numeric(field: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            AppError::InvalidInput(format!("field '{}' is not a finite number", field))
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            AppError::InvalidInput(format!(
                "field '{}' expects a number, got '{}'",
                field, s
            ))
        }),
        other => Err(AppError::InvalidInput(format!(
            "field '{}' expects a number, got {}",
            field,
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
