/// Shared application state
use crate::services::AuthService;
use melody_storage::LocalStorageContext;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<LocalStorageContext>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: Arc<LocalStorageContext>, auth_service: Arc<AuthService>) -> Self {
        Self { db, auth_service }
    }
}
