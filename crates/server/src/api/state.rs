use std::sync::Arc;

use data_loader::GameDataset;

use crate::recommender::GameRecommender;

/// Shared application state.
///
/// Everything here is read-only after startup, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<GameDataset>,
    pub recommender: GameRecommender,
}

impl AppState {
    pub fn new(dataset: Arc<GameDataset>) -> Self {
        Self {
            recommender: GameRecommender::new(dataset.clone()),
            dataset,
        }
    }
}
