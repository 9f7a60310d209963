pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::state::IncidentStore;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IncidentStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn IncidentStore>) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }
}
