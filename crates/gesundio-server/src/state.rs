use std::sync::Arc;

use gesundio_core::backend::PatientBackend;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn PatientBackend>,
}

impl AppState {
    pub fn new(backend: impl PatientBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}
