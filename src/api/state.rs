use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::services::providers::MetadataProvider;
use crate::services::recommend::Recommender;

/// Shared application state
///
/// The catalog artifacts are loaded once and never mutated, so the state is
/// a bundle of Arcs with no lock around them.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Wires the loaded store and a metadata provider into request state
    pub fn new(store: CatalogStore, provider: Arc<dyn MetadataProvider>) -> Self {
        let store = Arc::new(store);
        let recommender = Arc::new(Recommender::new(store.clone(), provider));

        Self { store, recommender }
    }
}
