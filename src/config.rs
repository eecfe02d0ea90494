use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Startup artifact locations
    pub artifacts: ArtifactsConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: CHURN_)
            .add_source(
                config::Environment::with_prefix("CHURN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Locations of the model, scaler, feature-list, and dataset artifacts
/// consumed during startup. All four must be present and well-formed
/// before the service accepts traffic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Trained model artifact (JSON)
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Fitted scaler constants (JSON)
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,

    /// Ordered feature-name list (text, one per line)
    #[serde(default = "default_features_path")]
    pub features_path: PathBuf,

    /// Customer dataset (CSV)
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON
    #[serde(default)]
    pub json_logs: bool,

    /// Service name for log records
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_model_path() -> PathBuf {
    "artifacts/churn_model.json".into()
}

fn default_scaler_path() -> PathBuf {
    "artifacts/scaler.json".into()
}

fn default_features_path() -> PathBuf {
    "artifacts/model_features.txt".into()
}

fn default_dataset_path() -> PathBuf {
    "artifacts/enhanced_customer_data.csv".into()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "churn-insight".to_string()
}
