use std::sync::Arc;

use crate::db::PlayerStore;

/// Shared by every handler through axum's `State` extractor. Cloning only
/// bumps the reference count on the store.
#[derive(Clone)]
pub struct AppState {
    pub players: Arc<dyn PlayerStore>,
}

impl AppState {
    pub fn new(players: Arc<dyn PlayerStore>) -> Self {
        Self { players }
    }
}
