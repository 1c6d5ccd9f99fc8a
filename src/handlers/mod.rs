pub mod estimate;
pub mod fleet;
pub mod health;
pub mod metrics_handler;

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::config::Config;

/// Shared state for the pricing routes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
}

impl AppState {
    pub fn new(config: Arc<ArcSwap<Config>>) -> Self {
        Self { config }
    }
}
