use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered list of feature names the model was trained on.
///
/// The order is load-bearing: it fixes the shape of every feature vector
/// handed to the model, and must match the training-time column order
/// exactly. The schema is loaded once at startup and never re-derived from
/// the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Feature names in model input order
    names: Vec<String>,

    /// Name -> position lookup
    positions: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Build a schema from an ordered list of feature names
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(AppError::Startup(
                "feature schema is empty".to_string(),
            ));
        }

        let mut positions = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            if positions.insert(name.clone(), idx).is_some() {
                return Err(AppError::Startup(format!(
                    "duplicate feature name in schema: {}",
                    name
                )));
            }
        }

        Ok(Self { names, positions })
    }

    /// Parse a schema from feature-list artifact text (one name per line)
    pub fn parse(text: &str) -> Result<Self> {
        let names: Vec<String> = text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();

        Self::new(names)
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the schema has no features
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Feature names in model input order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a feature, if it is part of the schema
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Whether a field belongs to the schema
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }
}
