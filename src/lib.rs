//! Churn Insight — customer churn prediction and analytics service
//!
//! Serves churn-risk predictions and descriptive analytics for a customer
//! base, backed by a previously fitted classification model and a fixed
//! feature-encoding scheme. The inference pipeline reproduces the exact
//! feature representation used at training time from arbitrary,
//! possibly-incomplete request payloads; the analytics engine computes
//! grouped statistical summaries over the startup-loaded dataset.
//!
//! All model, scaler, feature-list, and dataset artifacts are loaded and
//! validated once during startup into an immutable [`context::ServiceContext`]
//! shared across requests.

pub mod analytics;
pub mod api;
pub mod catalog;
pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod ml;
pub mod models;

pub use error::{AppError, Result};
