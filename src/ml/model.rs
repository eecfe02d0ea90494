use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Artifact schema version this build understands
pub const MODEL_SCHEMA_VERSION: u32 = 1;

/// Model metadata carried inside the artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name
    pub name: String,

    /// Artifact version string
    pub version: String,

    /// When the model was fitted
    pub trained_at: DateTime<Utc>,
}

/// Persisted model artifact: versioned JSON produced by the offline
/// training pipeline and treated here as an opaque, validated input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Artifact format version
    pub schema_version: u32,

    /// Model metadata
    pub metadata: ModelMetadata,

    /// Kind-specific parameters
    #[serde(flatten)]
    pub model: ModelKind,
}

/// Supported model families
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    /// Binary logistic regression over the feature vector
    LogisticRegression {
        /// One coefficient per schema feature
        coefficients: Vec<f64>,
        /// Intercept term
        intercept: f64,
    },

    /// Boosted ensemble of regression trees producing a positive-class margin
    GradientBoosting {
        /// Trees applied in sequence
        trees: Vec<Tree>,
        /// Shrinkage applied to each tree's output; 1.0 when absent
        #[serde(default = "default_learning_rate")]
        learning_rate: f64,
        /// Margin before any tree contribution; 0.0 when absent
        #[serde(default)]
        base_score: f64,
        /// Per-feature importances, aligned with the feature schema
        feature_importances: Vec<f64>,
    },
}

fn default_learning_rate() -> f64 {
    1.0
}

/// A single regression tree, stored as a flat node arena with index links
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

/// One node of a regression tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal threshold split: `x[feature] < threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },

    /// Terminal node carrying the tree's output value
    Leaf { value: f64 },
}

impl Tree {
    /// Evaluate the tree for one feature vector
    fn score(&self, features: &Array1<f64>) -> Result<f64> {
        let mut idx = 0;
        // Bounded by node count; a malformed artifact with an index cycle
        // terminates with an error instead of looping.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().ok_or_else(|| {
                        AppError::Internal(format!(
                            "tree references feature index {} beyond vector length {}",
                            feature,
                            features.len()
                        ))
                    })?;
                    idx = if value < *threshold { *left } else { *right };
                }
                None => {
                    return Err(AppError::Internal(format!(
                        "tree node index {} out of bounds",
                        idx
                    )))
                }
            }
        }

        Err(AppError::Internal(
            "tree traversal did not reach a leaf".to_string(),
        ))
    }
}

/// The loaded churn model: scores feature vectors and exposes per-feature
/// importances when the underlying family supports them.
#[derive(Debug, Clone)]
pub struct ChurnModel {
    metadata: ModelMetadata,
    kind: ModelKind,
}

impl ChurnModel {
    /// Validate an artifact against the expected feature count and build
    /// the model
    pub fn from_artifact(artifact: ModelArtifact, n_features: usize) -> Result<Self> {
        if artifact.schema_version != MODEL_SCHEMA_VERSION {
            return Err(AppError::Startup(format!(
                "unsupported model schema version {} (expected {})",
                artifact.schema_version, MODEL_SCHEMA_VERSION
            )));
        }

        match &artifact.model {
            ModelKind::LogisticRegression { coefficients, .. } => {
                if coefficients.len() != n_features {
                    return Err(AppError::Startup(format!(
                        "model has {} coefficients but the feature schema has {} features",
                        coefficients.len(),
                        n_features
                    )));
                }
            }
            ModelKind::GradientBoosting {
                trees,
                feature_importances,
                ..
            } => {
                if trees.is_empty() {
                    return Err(AppError::Startup(
                        "gradient boosting model has no trees".to_string(),
                    ));
                }
                if feature_importances.len() != n_features {
                    return Err(AppError::Startup(format!(
                        "model has {} feature importances but the feature schema has {} features",
                        feature_importances.len(),
                        n_features
                    )));
                }
                for tree in trees {
                    for node in &tree.nodes {
                        if let TreeNode::Split { feature, .. } = node {
                            if *feature >= n_features {
                                return Err(AppError::Startup(format!(
                                    "tree split references feature index {} outside schema",
                                    feature
                                )));
                            }
                        }
                    }
                }
            }
        }

        Ok(Self {
            metadata: artifact.metadata,
            kind: artifact.model,
        })
    }

    /// Model metadata
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Positive-class (churn) probability for one feature vector
    pub fn predict_proba(&self, features: &Array1<f64>) -> Result<f64> {
        let margin = match &self.kind {
            ModelKind::LogisticRegression {
                coefficients,
                intercept,
            } => {
                let weights = Array1::from_vec(coefficients.clone());
                weights.dot(features) + intercept
            }
            ModelKind::GradientBoosting {
                trees,
                learning_rate,
                base_score,
                ..
            } => {
                let mut margin = *base_score;
                for tree in trees {
                    margin += learning_rate * tree.score(features)?;
                }
                margin
            }
        };

        Ok(sigmoid(margin))
    }

    /// Binary class label derived from the 0.5 probability threshold
    pub fn predict(&self, features: &Array1<f64>) -> Result<u8> {
        let probability = self.predict_proba(features)?;
        Ok(if probability >= 0.5 { 1 } else { 0 })
    }

    /// Per-feature importances, if the model family exposes them
    pub fn feature_importances(&self) -> Option<&[f64]> {
        match &self.kind {
            ModelKind::GradientBoosting {
                feature_importances,
                ..
            } => Some(feature_importances),
            ModelKind::LogisticRegression { .. } => None,
        }
    }
}

fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> ModelMetadata {
        ModelMetadata {
            name: "churn".to_string(),
            version: "1.0".to_string(),
            trained_at: Utc::now(),
        }
    }

    fn logistic_artifact(coefficients: Vec<f64>, intercept: f64) -> ModelArtifact {
        ModelArtifact {
            schema_version: MODEL_SCHEMA_VERSION,
            metadata: metadata(),
            model: ModelKind::LogisticRegression {
                coefficients,
                intercept,
            },
        }
    }

    fn stump(feature: usize, threshold: f64, left_value: f64, right_value: f64) -> Tree {
        Tree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: left_value },
                TreeNode::Leaf { value: right_value },
            ],
        }
    }

    #[test]
    fn test_logistic_regression_probability() {
        let model =
            ChurnModel::from_artifact(logistic_artifact(vec![1.0, -1.0], 0.0), 2).unwrap();

        let even = Array1::from_vec(vec![0.0, 0.0]);
        assert!((model.predict_proba(&even).unwrap() - 0.5).abs() < 1e-12);

        let positive = Array1::from_vec(vec![3.0, 0.0]);
        assert!(model.predict_proba(&positive).unwrap() > 0.9);
        assert_eq!(model.predict(&positive).unwrap(), 1);

        let negative = Array1::from_vec(vec![0.0, 3.0]);
        assert!(model.predict_proba(&negative).unwrap() < 0.1);
        assert_eq!(model.predict(&negative).unwrap(), 0);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let model =
            ChurnModel::from_artifact(logistic_artifact(vec![0.4, 0.3, -0.2], 0.1), 3).unwrap();
        let features = Array1::from_vec(vec![1.5, -0.5, 2.0]);

        let first = model.predict_proba(&features).unwrap();
        let second = model.predict_proba(&features).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_gradient_boosting_scoring() {
        let artifact = ModelArtifact {
            schema_version: MODEL_SCHEMA_VERSION,
            metadata: metadata(),
            model: ModelKind::GradientBoosting {
                trees: vec![stump(0, 0.5, -2.0, 2.0), stump(1, 0.0, -1.0, 1.0)],
                learning_rate: 1.0,
                base_score: 0.0,
                feature_importances: vec![0.7, 0.3],
            },
        };
        let model = ChurnModel::from_artifact(artifact, 2).unwrap();

        // Both splits route right: margin = 2 + 1 = 3
        let high = Array1::from_vec(vec![1.0, 1.0]);
        assert!(model.predict_proba(&high).unwrap() > 0.9);

        // Both splits route left: margin = -3
        let low = Array1::from_vec(vec![0.0, -1.0]);
        assert!(model.predict_proba(&low).unwrap() < 0.1);
    }

    #[test]
    fn test_feature_importances_by_family() {
        let logistic =
            ChurnModel::from_artifact(logistic_artifact(vec![1.0], 0.0), 1).unwrap();
        assert!(logistic.feature_importances().is_none());

        let boosted = ChurnModel::from_artifact(
            ModelArtifact {
                schema_version: MODEL_SCHEMA_VERSION,
                metadata: metadata(),
                model: ModelKind::GradientBoosting {
                    trees: vec![stump(0, 0.0, -1.0, 1.0)],
                    learning_rate: 0.1,
                    base_score: 0.0,
                    feature_importances: vec![1.0],
                },
            },
            1,
        )
        .unwrap();
        assert_eq!(boosted.feature_importances(), Some(&[1.0][..]));
    }

    #[test]
    fn test_coefficient_count_mismatch_rejected() {
        let err = ChurnModel::from_artifact(logistic_artifact(vec![1.0, 2.0], 0.0), 3)
            .unwrap_err();
        assert!(err.to_string().contains("coefficients"));
    }

    #[test]
    fn test_unsupported_schema_version_rejected() {
        let mut artifact = logistic_artifact(vec![1.0], 0.0);
        artifact.schema_version = 99;
        assert!(ChurnModel::from_artifact(artifact, 1).is_err());
    }

    #[test]
    fn test_malformed_tree_does_not_loop() {
        let artifact = ModelArtifact {
            schema_version: MODEL_SCHEMA_VERSION,
            metadata: metadata(),
            model: ModelKind::GradientBoosting {
                // Split points back at itself
                trees: vec![Tree {
                    nodes: vec![TreeNode::Split {
                        feature: 0,
                        threshold: 0.0,
                        left: 0,
                        right: 0,
                    }],
                }],
                learning_rate: 1.0,
                base_score: 0.0,
                feature_importances: vec![1.0],
            },
        };
        let model = ChurnModel::from_artifact(artifact, 1).unwrap();

        let features = Array1::from_vec(vec![1.0]);
        assert!(model.predict_proba(&features).is_err());
    }

    #[test]
    fn test_artifact_json_roundtrip() {
        let json = serde_json::json!({
            "schema_version": 1,
            "metadata": {
                "name": "churn",
                "version": "1.0",
                "trained_at": "2025-06-01T00:00:00Z"
            },
            "kind": "logistic_regression",
            "coefficients": [0.1, -0.2],
            "intercept": 0.05
        });

        let artifact: ModelArtifact = serde_json::from_value(json).unwrap();
        let model = ChurnModel::from_artifact(artifact, 2).unwrap();
        assert_eq!(model.metadata().name, "churn");
    }
}
