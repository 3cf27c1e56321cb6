//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, MovieService, RatingService, RoleService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub movie_service: Arc<dyn MovieService>,
    pub rating_service: Arc<dyn RatingService>,
    pub role_service: Arc<dyn RoleService>,
    /// Database handle for health checks. Absent when the services run
    /// without a database.
    pub database: Option<Arc<Database>>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Allowed CORS origin. `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
}

impl AppState {
    /// Create application state from a database connection and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        let mut state = Self::from_services(&services, config.static_dir.clone());
        state.database = Some(database);
        state.cors_allowed_origin = config.cors_allowed_origin.clone();
        state
    }

    /// Create application state from an arbitrary service container.
    pub fn from_services(services: &dyn ServiceContainer, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            auth_service: services.auth(),
            movie_service: services.movies(),
            rating_service: services.ratings(),
            role_service: services.roles(),
            database: None,
            static_dir: static_dir.into(),
            cors_allowed_origin: None,
        }
    }
}
