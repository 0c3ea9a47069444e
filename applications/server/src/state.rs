/// Shared application state
use crate::services::AuthService;
use std::sync::Arc;
use stowaway_core::{CatalogSearch, RecordStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn RecordStore>,
    pub auth_service: Arc<AuthService>,
    pub catalog: Arc<dyn CatalogSearch>,
}

impl AppState {
    pub fn new(
        db: Arc<dyn RecordStore>,
        auth_service: Arc<AuthService>,
        catalog: Arc<dyn CatalogSearch>,
    ) -> Self {
        Self {
            db,
            auth_service,
            catalog,
        }
    }
}
