use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GenerativeProvider;
use crate::search::controller::SearchController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generative backend. `GeminiClient` in production, a scripted fake in tests.
    pub provider: Arc<dyn GenerativeProvider>,
    pub controller: SearchController,
    pub config: Config,
}

impl AppState {
    pub fn new(provider: Arc<dyn GenerativeProvider>, config: Config) -> Self {
        let controller = SearchController::new(Arc::clone(&provider), config.default_location.clone())
            .with_session_ttl(config.session_ttl);
        Self {
            provider,
            controller,
            config,
        }
    }
}
