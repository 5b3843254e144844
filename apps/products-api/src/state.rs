//! Application state management

use sea_orm::DatabaseConnection;

/// State behind the `/ready` check
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
