use crate::dataset::Dataset;
use crate::error::{AppError, Result};
use crate::models::CustomerRow;
use serde::Serialize;
use std::sync::Arc;

/// One page of customer rows
#[derive(Debug, Clone, Serialize)]
pub struct CustomerPage {
    pub customers: Vec<CustomerRow>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// Paginated read-only access to the raw customer rows
#[derive(Debug, Clone)]
pub struct CustomerCatalog {
    dataset: Arc<Dataset>,
}

impl CustomerCatalog {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// Fetch one page of rows.
    ///
    /// Pages are 1-based. Pages past the end of the dataset return an empty
    /// record list, not an error; `total` and `total_pages` still describe
    /// the whole dataset.
    pub fn page(&self, page: u32, per_page: u32) -> Result<CustomerPage> {
        if page < 1 {
            return Err(AppError::InvalidInput(
                "page must be a positive integer".to_string(),
            ));
        }
        if per_page < 1 {
            return Err(AppError::InvalidInput(
                "per_page must be a positive integer".to_string(),
            ));
        }

        let total = self.dataset.len();
        let total_pages = total.div_ceil(per_page as usize) as u32;

        let start = (page as usize - 1).saturating_mul(per_page as usize);
        let customers = if start >= total {
            Vec::new()
        } else {
            let end = (start + per_page as usize).min(total);
            self.dataset.rows()[start..end].to_vec()
        };

        Ok(CustomerPage {
            customers,
            total,
            page,
            per_page,
            total_pages,
        })
    }
}
