//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use docbase_core::config::AppConfig;
use docbase_core::traits::DocumentStore;
use docbase_database::repositories::UserRepository;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. The store handle is
/// constructed once at startup and shared by every repository.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Document store handle
    pub store: Arc<dyn DocumentStore>,
    /// User repository
    pub users: UserRepository,
}

impl AppState {
    /// Build state and every typed repository over one store handle.
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let users = UserRepository::users(Arc::clone(&store), &config.store);
        Self {
            config: Arc::new(config),
            store,
            users,
        }
    }
}
