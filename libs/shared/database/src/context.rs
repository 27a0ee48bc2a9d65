use std::sync::Arc;

use shared_config::AppConfig;

use crate::postgrest::PostgrestClient;

/// Process-wide context built once at startup and handed to every cell.
/// Keeps the store connection explicit instead of a package-level singleton.
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<PostgrestClient>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(PostgrestClient::new(&config));
        Self { config, store }
    }
}
