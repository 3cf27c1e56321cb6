//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, movie_handler, rating_handler, role_handler};
use crate::domain::{Movie, Rating, Role, UserResponse};
use crate::services::{Claims, TokenResponse};
use crate::types::{MessageResponse, MoviePage};

/// OpenAPI documentation for the Movie Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movie Catalog API",
        version = "0.1.0",
        description = "Movies, ratings, authentication and roles",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Movie endpoints
        movie_handler::list_movies,
        movie_handler::get_movie,
        movie_handler::create_movie,
        movie_handler::update_movie,
        movie_handler::delete_movie,
        // Rating endpoints
        rating_handler::create_rating,
        rating_handler::list_movie_ratings,
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::profile,
        // Role endpoints
        role_handler::list_roles,
        role_handler::get_role,
        role_handler::create_role,
        role_handler::delete_role,
    ),
    components(
        schemas(
            // Domain types
            Movie,
            MoviePage,
            Rating,
            Role,
            UserResponse,
            // Request and response types
            movie_handler::MovieFormSchema,
            rating_handler::CreateRatingRequest,
            role_handler::CreateRoleRequest,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            Claims,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Movies", description = "Movie catalog"),
        (name = "Ratings", description = "User ratings of movies"),
        (name = "Authentication", description = "Registration, login and profile"),
        (name = "Roles", description = "Role reference data")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
