//! Service Container - Centralized service access.
//!
//! Wires every service to one Unit of Work, one token service and one
//! poster storage so handlers only see service traits.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, MovieCatalog, MovieService, RatingManager, RatingService,
    RoleManager, RoleService, TokenService,
};
use crate::config::Config;
use crate::infra::{LocalPosterStorage, Persistence, PosterStorage, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn movies(&self) -> Arc<dyn MovieService>;

    fn ratings(&self) -> Arc<dyn RatingService>;

    fn roles(&self) -> Arc<dyn RoleService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    movie_service: Arc<dyn MovieService>,
    rating_service: Arc<dyn RatingService>,
    role_service: Arc<dyn RoleService>,
}

impl Services {
    /// Build every service over the given Unit of Work.
    pub fn from_unit_of_work<U: UnitOfWork>(
        uow: Arc<U>,
        tokens: TokenService,
        posters: Arc<dyn PosterStorage>,
    ) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), tokens)),
            movie_service: Arc::new(MovieCatalog::new(uow.clone(), posters)),
            rating_service: Arc::new(RatingManager::new(uow.clone())),
            role_service: Arc::new(RoleManager::new(uow)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        Self::from_unit_of_work(
            Arc::new(Persistence::new(db)),
            TokenService::from_config(config),
            Arc::new(LocalPosterStorage::new(config.static_dir.clone())),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn movies(&self) -> Arc<dyn MovieService> {
        self.movie_service.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingService> {
        self.rating_service.clone()
    }

    fn roles(&self) -> Arc<dyn RoleService> {
        self.role_service.clone()
    }
}
