//! Descriptive analytics over the customer dataset
//!
//! This module computes the grouped statistical summaries served to the
//! dashboard:
//!
//! - **Overview**: total customers, churn rate, retention rate
//! - **Demographics**: churn by gender, income level, marital status, and a
//!   derived age group
//! - **Business metrics**: churn by contract type, plus mean monthly charges
//!   and tenure split by churned vs retained customers
//!
//! Summaries are recomputed per request over the immutable startup-loaded
//! dataset; aggregation failures surface as `AggregationError` responses.

mod aggregation;
mod error;

pub use aggregation::{
    AgeGroup, AnalyticsAggregator, AnalyticsSummary, BusinessMetrics, ChurnComparator,
    Demographics, GroupSummary, Overview,
};
pub use error::{AnalyticsError, AnalyticsResult};
