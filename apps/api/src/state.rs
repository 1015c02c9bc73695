use std::sync::Arc;

use crate::analysis::AtsAnalyzer;
use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    pub analyzer: AtsAnalyzer,
    /// Same generator the analyzer holds; used directly by the rewrite endpoints.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn ResumeStore>, generator: Arc<dyn TextGenerator>, config: Config) -> Self {
        let analyzer = AtsAnalyzer::new(generator.clone(), config.ats_weights, config.llm_timeout);
        Self {
            store,
            analyzer,
            generator,
            config,
        }
    }
}
