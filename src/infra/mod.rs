//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection, migrations and repositories
//! - Poster file storage
//! - Unit of Work for repository access

pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    MovieRepository, MovieStore, RatingRepository, RatingStore, RoleRepository, RoleStore,
    UserRepository, UserStore,
};
pub use storage::{LocalPosterStorage, PosterStorage};
pub use unit_of_work::{Persistence, UnitOfWork};
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::TestUnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockMovieRepository, MockRatingRepository, MockRoleRepository, MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockPosterStorage;
