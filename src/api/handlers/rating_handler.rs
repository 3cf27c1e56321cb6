//! Rating handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewRating, Rating};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Rating creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingRequest {
    pub user_id: Uuid,
    pub movie_id: Uuid,
    /// Score between 0 and 10
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"))]
    #[schema(example = 8.5, minimum = 0, maximum = 10)]
    pub rating: f64,
    #[serde(default)]
    #[schema(example = "Slow burn, worth it.")]
    pub comment: String,
}

/// Create rating routes
pub fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/ratings", post(create_rating))
        .route("/movies/:id/ratings", get(list_movie_ratings))
}

/// Rate a movie. Each user may rate a movie once.
#[utoipa::path(
    post,
    path = "/api/ratings",
    tag = "Ratings",
    request_body = CreateRatingRequest,
    responses(
        (status = 201, description = "Rating stored", body = MessageResponse),
        (status = 400, description = "Invalid rating or movie already rated"),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn create_rating(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRatingRequest>,
) -> AppResult<Created<MessageResponse>> {
    state
        .rating_service
        .create(NewRating {
            user_id: payload.user_id,
            movie_id: payload.movie_id,
            rating: payload.rating,
            comment: payload.comment,
        })
        .await?;

    Ok(Created(MessageResponse::new(
        "Movie rating added successfully.",
    )))
}

/// List the ratings of a movie, newest first
#[utoipa::path(
    get,
    path = "/api/movies/{id}/ratings",
    tag = "Ratings",
    params(("id" = Uuid, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Ratings of the movie", body = [Rating]),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn list_movie_ratings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Rating>>> {
    let ratings = state.rating_service.list_for_movie(id).await?;
    Ok(Json(ratings))
}
