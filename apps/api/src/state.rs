use std::sync::Arc;

use crate::export::Exporter;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ResumeStore>,
    pub exporter: Arc<Exporter>,
}
