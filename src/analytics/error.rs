//! Error types for analytics operations

use crate::error::AppError;

/// Result type for analytics operations
pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur in analytics operations
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Dataset has no rows to aggregate
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// A column required for aggregation is unusable
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Calculation error
    #[error("Calculation error: {0}")]
    CalculationError(String),
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        AppError::Aggregation(err.to_string())
    }
}
