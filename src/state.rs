use std::sync::Arc;

use crate::config::Config;
use crate::upstream::StatsClient;

/// Shared application state handed to every route handler.
pub struct AppState {
    pub config: Config,
    pub stats: StatsClient,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let stats = StatsClient::new(config.api_base_url.clone(), config.http_timeout);
        Arc::new(Self { config, stats })
    }
}
