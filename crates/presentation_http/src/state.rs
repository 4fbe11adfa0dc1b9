//! Application state shared across handlers

use std::sync::Arc;

use application::UserService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// User registration service
    pub user_service: Arc<UserService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
