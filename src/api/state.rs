use crate::config::AppConfig;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared handler state.
pub type AppState = Arc<State>;

#[derive(Debug, Clone)]
pub struct State {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
}

impl State {
    #[must_use]
    pub fn new(db: DatabaseConnection, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }
}
