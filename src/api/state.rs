use std::sync::Arc;

use crate::config::Config;
use crate::jobs::JobStore;
use crate::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: JobStore,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            store: JobStore::new(),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
