//! Movie Catalog - HTTP backend for a movie catalog
//!
//! Movies with poster uploads, filtered and paginated listing, one rating
//! per user per movie, JWT authentication and role management.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Catalog entities, the list query model and value objects
//! - **services**: Application use cases and business logic
//! - **infra**: Database, repositories and poster storage
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (applies pending migrations)
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Make a registered user an administrator
//! cargo run -- grant-role ana@example.com admin
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Movie, MovieQuery, Password, Rating, Role, User};
pub use errors::{AppError, AppResult};
