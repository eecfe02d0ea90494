use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Names of the numeric features the scaler covers, and nothing else
pub const NUMERIC_FEATURES: [&str; 4] = ["Age", "MonthlyCharges", "Tenure", "TotalCharges"];

/// Artifact schema version this build understands
pub const SCALER_SCHEMA_VERSION: u32 = 1;

/// Per-feature statistics fitted offline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FeatureStats {
    pub mean: f64,
    pub std_dev: f64,
}

/// Persisted scaler artifact: versioned JSON holding the fitted statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    /// Artifact format version
    pub schema_version: u32,

    /// Fitted statistics per numeric feature
    pub features: HashMap<String, FeatureStats>,
}

impl ScalerArtifact {
    /// Validate the artifact and build the scaler
    pub fn into_scaler(self) -> Result<NumericScaler> {
        if self.schema_version != SCALER_SCHEMA_VERSION {
            return Err(AppError::Startup(format!(
                "unsupported scaler schema version {} (expected {})",
                self.schema_version, SCALER_SCHEMA_VERSION
            )));
        }
        NumericScaler::new(self.features)
    }
}

/// Standardizing transform applied to the numeric features at inference
/// time, using mean/stddev constants fitted once during training.
///
/// Applying the scaler to any field outside `NUMERIC_FEATURES` is an error:
/// categorical codes must pass through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericScaler {
    stats: HashMap<String, FeatureStats>,
}

impl NumericScaler {
    /// Build a scaler from fitted statistics.
    ///
    /// The statistics must cover exactly the fixed numeric feature set;
    /// a missing or extra entry means the artifact does not match this
    /// service version.
    pub fn new(stats: HashMap<String, FeatureStats>) -> Result<Self> {
        for feature in NUMERIC_FEATURES {
            if !stats.contains_key(feature) {
                return Err(AppError::Startup(format!(
                    "scaler artifact is missing statistics for '{}'",
                    feature
                )));
            }
        }

        if let Some(extra) = stats.keys().find(|k| !NUMERIC_FEATURES.contains(&k.as_str())) {
            return Err(AppError::Startup(format!(
                "scaler artifact has statistics for unexpected feature '{}'",
                extra
            )));
        }

        Ok(Self { stats })
    }

    /// Whether a feature is scaled by this transform
    pub fn covers(&self, feature: &str) -> bool {
        self.stats.contains_key(feature)
    }

    /// Standardize a raw numeric value: `(raw - mean) / std_dev`.
    ///
    /// A degenerate fitted std_dev of zero yields 0.0 deterministically.
    pub fn scale(&self, feature: &str, raw: f64) -> Result<f64> {
        let stats = self.stats.get(feature).ok_or_else(|| {
            AppError::InvalidInput(format!("'{}' is not a scaled numeric feature", feature))
        })?;

        if stats.std_dev == 0.0 {
            return Ok(0.0);
        }

        Ok((raw - stats.mean) / stats.std_dev)
    }
}
