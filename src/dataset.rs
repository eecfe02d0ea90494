use crate::error::{AppError, Result};
use crate::models::CustomerRow;
use std::path::Path;

/// The customer dataset, loaded once at startup and immutable thereafter.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<CustomerRow>,
}

impl Dataset {
    /// Build a dataset from rows, rejecting an empty table
    pub fn new(rows: Vec<CustomerRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(AppError::Startup("customer dataset is empty".to_string()));
        }
        Ok(Self { rows })
    }

    /// Load the dataset from a CSV file.
    ///
    /// Every row must parse against the fixed customer columns; a malformed
    /// or truncated row aborts the load with the row number in the message.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            AppError::Startup(format!(
                "cannot open dataset {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut rows = Vec::new();
        for (idx, record) in reader.deserialize::<CustomerRow>().enumerate() {
            let row = record.map_err(|e| {
                AppError::Startup(format!(
                    "dataset {} row {}: {}",
                    path.display(),
                    idx + 1,
                    e
                ))
            })?;
            rows.push(row);
        }

        Self::new(rows)
    }

    /// All rows, in file order
    pub fn rows(&self) -> &[CustomerRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
