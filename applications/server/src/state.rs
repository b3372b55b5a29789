/// Shared application state
use crate::{config::PlayerSettings, services::AuthService};
use cadence_core::{Catalog, HistoryLog};
use cadence_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// The resolver endpoints only see `catalog` and `history`; `db` backs the
/// account, track and playlist management routes.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub catalog: Arc<dyn Catalog>,
    pub history: Arc<dyn HistoryLog>,
    pub auth_service: Arc<AuthService>,
    pub player: PlayerSettings,
}

impl AppState {
    pub fn new(db: Arc<Database>, auth_service: Arc<AuthService>, player: PlayerSettings) -> Self {
        Self {
            catalog: db.clone(),
            history: db.clone(),
            db,
            auth_service,
            player,
        }
    }

    /// Replace the catalog and history collaborators
    #[must_use]
    pub fn with_collaborators(
        mut self,
        catalog: Arc<dyn Catalog>,
        history: Arc<dyn HistoryLog>,
    ) -> Self {
        self.catalog = catalog;
        self.history = history;
        self
    }
}
