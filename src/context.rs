use crate::analytics::AnalyticsAggregator;
use crate::catalog::CustomerCatalog;
use crate::config::ArtifactsConfig;
use crate::dataset::Dataset;
use crate::error::{AppError, Result};
use crate::ml::{
    CategoricalEncoder, ChurnModel, FeatureSchema, ModelArtifact, NumericScaler,
    PredictionService, ScalerArtifact,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Process-wide immutable state assembled once during startup.
///
/// Every operation reads from this snapshot; nothing in it is mutated after
/// construction, so it is shared by reference across all concurrent
/// requests without locking. A failed load of any artifact is fatal: the
/// service must not accept traffic with a partial snapshot.
#[derive(Debug)]
pub struct ServiceContext {
    /// Inference pipeline (schema + encoder + scaler + model)
    pub prediction: PredictionService,

    /// Grouped-statistics engine
    pub aggregator: AnalyticsAggregator,

    /// Paginated customer access
    pub catalog: CustomerCatalog,

    /// The startup-loaded dataset
    pub dataset: Arc<Dataset>,
}

impl ServiceContext {
    /// Load and validate all artifacts, then assemble the context.
    pub fn initialize(config: &ArtifactsConfig) -> Result<Self> {
        let schema = load_schema(&config.features_path)?;
        info!(features = schema.len(), "Feature schema loaded");

        let scaler = load_scaler(&config.scaler_path)?;
        info!("Scaler constants loaded");

        let model = load_model(&config.model_path, schema.len())?;
        info!(
            name = %model.metadata().name,
            version = %model.metadata().version,
            "Model loaded"
        );

        let dataset = Arc::new(Dataset::load_csv(&config.dataset_path)?);
        info!(rows = dataset.len(), "Customer dataset loaded");

        let prediction =
            PredictionService::new(schema, CategoricalEncoder::new(), scaler, model);

        Ok(Self {
            prediction,
            aggregator: AnalyticsAggregator::new(),
            catalog: CustomerCatalog::new(dataset.clone()),
            dataset,
        })
    }
}

fn load_schema(path: &Path) -> Result<FeatureSchema> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::Startup(format!(
            "cannot read feature list {}: {}",
            path.display(),
            e
        ))
    })?;
    FeatureSchema::parse(&text)
}

fn load_scaler(path: &Path) -> Result<NumericScaler> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::Startup(format!(
            "cannot read scaler artifact {}: {}",
            path.display(),
            e
        ))
    })?;
    let artifact: ScalerArtifact = serde_json::from_str(&text).map_err(|e| {
        AppError::Startup(format!(
            "scaler artifact {} is corrupt: {}",
            path.display(),
            e
        ))
    })?;
    artifact.into_scaler()
}

fn load_model(path: &Path, n_features: usize) -> Result<ChurnModel> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::Startup(format!(
            "cannot read model artifact {}: {}",
            path.display(),
            e
        ))
    })?;
    let artifact: ModelArtifact = serde_json::from_str(&text).map_err(|e| {
        AppError::Startup(format!(
            "model artifact {} is corrupt: {}",
            path.display(),
            e
        ))
    })?;
    ChurnModel::from_artifact(artifact, n_features)
}
