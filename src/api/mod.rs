pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::context::ServiceContext;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ServiceContext>,
}

impl AppState {
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}
