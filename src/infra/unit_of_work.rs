//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories so services depend on a
//! single injectable handle instead of one store per aggregate.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    MovieRepository, MovieStore, RatingRepository, RatingStore, RoleRepository, RoleStore,
    UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync + 'static {
    fn movies(&self) -> Arc<dyn MovieRepository>;

    fn ratings(&self) -> Arc<dyn RatingRepository>;

    fn roles(&self) -> Arc<dyn RoleRepository>;

    fn users(&self) -> Arc<dyn UserRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM stores
pub struct Persistence {
    movie_repo: Arc<MovieStore>,
    rating_repo: Arc<RatingStore>,
    role_repo: Arc<RoleStore>,
    user_repo: Arc<UserStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            movie_repo: Arc::new(MovieStore::new(db.clone())),
            rating_repo: Arc::new(RatingStore::new(db.clone())),
            role_repo: Arc::new(RoleStore::new(db.clone())),
            user_repo: Arc::new(UserStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn movies(&self) -> Arc<dyn MovieRepository> {
        self.movie_repo.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingRepository> {
        self.rating_repo.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.role_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }
}

/// Unit of Work assembled from arbitrary repositories, typically mocks.
///
/// Repositories not replaced are expectation-free mocks that panic if used.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestUnitOfWork {
    movies: Arc<dyn MovieRepository>,
    ratings: Arc<dyn RatingRepository>,
    roles: Arc<dyn RoleRepository>,
    users: Arc<dyn UserRepository>,
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for TestUnitOfWork {
    fn default() -> Self {
        use super::repositories::{
            MockMovieRepository, MockRatingRepository, MockRoleRepository, MockUserRepository,
        };

        Self {
            movies: Arc::new(MockMovieRepository::new()),
            ratings: Arc::new(MockRatingRepository::new()),
            roles: Arc::new(MockRoleRepository::new()),
            users: Arc::new(MockUserRepository::new()),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl TestUnitOfWork {
    pub fn with_movies(mut self, repo: impl MovieRepository + 'static) -> Self {
        self.movies = Arc::new(repo);
        self
    }

    pub fn with_ratings(mut self, repo: impl RatingRepository + 'static) -> Self {
        self.ratings = Arc::new(repo);
        self
    }

    pub fn with_roles(mut self, repo: impl RoleRepository + 'static) -> Self {
        self.roles = Arc::new(repo);
        self
    }

    pub fn with_users(mut self, repo: impl UserRepository + 'static) -> Self {
        self.users = Arc::new(repo);
        self
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl UnitOfWork for TestUnitOfWork {
    fn movies(&self) -> Arc<dyn MovieRepository> {
        self.movies.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingRepository> {
        self.ratings.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.roles.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }
}
