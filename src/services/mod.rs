//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, with repository access through the Unit of Work.

mod auth_service;
pub mod container;
mod movie_service;
mod rating_service;
mod role_service;
mod token_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use movie_service::{MovieCatalog, MovieForm, MovieService, PosterUpload};
pub use rating_service::{RatingManager, RatingService, DUPLICATE_RATING_MESSAGE};
pub use role_service::{RoleManager, RoleService};
pub use token_service::{Claims, TokenResponse, TokenService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
