//! Shared fixtures for integration tests: a full set of artifact files
//! written into a temporary directory, matching the formats the service
//! loads at startup.

#![allow(dead_code)]

use churn_insight::config::ArtifactsConfig;
use churn_insight::context::ServiceContext;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const FEATURES: &str = "Age\nGender\nMaritalStatus\nIncomeLevel\nMonthlyCharges\nTenure\nTotalCharges\nContract\nInternetService\nOnlineSecurity\nTechSupport\nPaymentMethod\n";

pub const SCALER: &str = r#"{
    "schema_version": 1,
    "features": {
        "Age": {"mean": 45.0, "std_dev": 15.0},
        "MonthlyCharges": {"mean": 80.0, "std_dev": 25.0},
        "Tenure": {"mean": 24.0, "std_dev": 18.0},
        "TotalCharges": {"mean": 2000.0, "std_dev": 1500.0}
    }
}"#;

/// Single-stump boosted model splitting on scaled Age: ages below the
/// scaler mean (45) score a margin of -2 (low churn probability), ages at
/// or above it score +2 (high churn probability).
pub const MODEL: &str = r#"{
    "schema_version": 1,
    "metadata": {
        "name": "churn-gbdt",
        "version": "2.1",
        "trained_at": "2025-06-01T00:00:00Z"
    },
    "kind": "gradient_boosting",
    "trees": [
        {
            "nodes": [
                {"node": "split", "feature": 0, "threshold": 0.0, "left": 1, "right": 2},
                {"node": "leaf", "value": -2.0},
                {"node": "leaf", "value": 2.0}
            ]
        }
    ],
    "learning_rate": 1.0,
    "base_score": 0.0,
    "feature_importances": [0.30, 0.02, 0.01, 0.03, 0.20, 0.15, 0.10, 0.08, 0.04, 0.02, 0.01, 0.04]
}"#;

pub const DATASET: &str = "\
CustomerID,Age,Gender,MaritalStatus,IncomeLevel,MonthlyCharges,Tenure,TotalCharges,Contract,InternetService,OnlineSecurity,TechSupport,PaymentMethod,Churn
C-001,34,F,Single,Medium,75.5,12,906.0,Month-to-month,DSL,No,Yes,Electronic check,1
C-002,61,M,Married,High,110.0,48,5280.0,Two year,Fiber optic,Yes,Yes,Credit card,0
C-003,25,M,Single,Low,45.0,3,135.0,Month-to-month,No,No,No,Mailed check,1
C-004,47,F,Divorced,Medium,88.0,30,2640.0,One year,DSL,Yes,No,Bank transfer,0
C-005,70,F,Widowed,Low,60.0,60,3600.0,Two year,No,No,No,Mailed check,0
";

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

/// Write the standard artifact fixture set into `dir`
pub fn artifacts_config(dir: &Path) -> ArtifactsConfig {
    ArtifactsConfig {
        model_path: write_file(dir, "churn_model.json", MODEL),
        scaler_path: write_file(dir, "scaler.json", SCALER),
        features_path: write_file(dir, "model_features.txt", FEATURES),
        dataset_path: write_file(dir, "customers.csv", DATASET),
    }
}

/// Fully initialized service context over the fixture artifacts
pub fn test_context(dir: &Path) -> ServiceContext {
    ServiceContext::initialize(&artifacts_config(dir)).unwrap()
}
