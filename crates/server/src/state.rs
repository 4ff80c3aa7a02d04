use std::sync::Arc;

use engine::SimilarityEngine;

/// Shared application state.
///
/// The engine is read-only once built, so handlers share it through an
/// `Arc` with no lock.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SimilarityEngine>,
}

impl AppState {
    pub fn new(engine: Arc<SimilarityEngine>) -> Self {
        Self { engine }
    }
}
