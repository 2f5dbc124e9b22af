use std::sync::Arc;

use storage::services::{AdmissionSource, AllocationEngine};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn AdmissionSource>,
    pub engine: Arc<AllocationEngine>,
}

impl AppState {
    pub fn new(source: Arc<dyn AdmissionSource>) -> Self {
        let engine = Arc::new(AllocationEngine::new(Arc::clone(&source)));
        Self { source, engine }
    }
}
