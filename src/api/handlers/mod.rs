//! HTTP request handlers.

pub mod auth_handler;
pub mod movie_handler;
pub mod rating_handler;
pub mod role_handler;

pub use auth_handler::auth_routes;
pub use movie_handler::movie_routes;
pub use rating_handler::rating_routes;
pub use role_handler::role_routes;
