use std::sync::Arc;

use crate::config::Config;
use crate::extraction::PageExtractor;
use crate::interview::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub config: Config,
    /// Pluggable PDF extractor. Default: PdfPageExtractor.
    pub page_extractor: Arc<dyn PageExtractor>,
}
