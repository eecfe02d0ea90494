//! Inference pipeline for churn prediction
//!
//! This module reproduces the training-time feature representation at serve
//! time and scores it with the loaded model:
//! - Ordered feature schema loaded from the feature-list artifact
//! - Fixed categorical label encoding matching the offline label encoder
//! - Standardizing scaler for the numeric features
//! - Model scoring (logistic regression or boosted trees) with risk tiering

pub mod encoder;
pub mod model;
pub mod scaler;
pub mod schema;
pub mod service;

pub use encoder::{CategoricalEncoder, CATEGORICAL_FIELDS};
pub use model::{ChurnModel, ModelArtifact, ModelKind, ModelMetadata, Tree, TreeNode};
pub use scaler::{FeatureStats, NumericScaler, ScalerArtifact, NUMERIC_FEATURES};
pub use schema::FeatureSchema;
pub use service::{FeatureImportance, PredictionResult, PredictionService, RiskLevel};
