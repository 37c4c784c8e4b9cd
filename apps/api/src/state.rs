use std::sync::Arc;

use crate::config::Config;
use crate::ner::{EntityTagger, TokenClassifier};

/// Shared application state injected into all route handlers via Axum extractors.
/// Both model handles are loaded once at startup and read-only afterwards, so
/// concurrent requests share them without coordination.
#[derive(Clone)]
pub struct AppState {
    pub tagger: Arc<dyn EntityTagger>,
    pub classifier: Arc<dyn TokenClassifier>,
    pub config: Config,
}
