//! Movie catalog handlers.
//!
//! Create and update take `multipart/form-data` so a poster image can be
//! uploaded alongside the text fields.

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{MAX_POSTER_BYTES, POSTER_FIELD};
use crate::domain::{Movie, MovieQuery};
use crate::errors::{AppError, AppResult};
use crate::services::{MovieForm, PosterUpload};
use crate::types::{Created, MoviePage, Page, PageRequest};

/// Query parameters for the movie list.
///
/// Every value is taken as raw text; invalid paging values fall back to
/// the defaults while invalid sort or filter values are rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MovieListParams {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 10, max 100)
    pub limit: Option<String>,
    /// `releaseDate` (default) or `title`
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default)
    pub sort_order: Option<String>,
    /// JSON object, e.g. `{"title":"ark","genres":["drama"],"year":2016}`
    pub filters: Option<String>,
}

/// Multipart form accepted by create and update (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct MovieFormSchema {
    #[schema(example = "Arrival")]
    title: Option<String>,
    #[schema(example = "2016-11-11")]
    release_date: Option<String>,
    trailer_link: Option<String>,
    /// Repeated field or a comma-separated list
    #[schema(example = "drama,sci-fi")]
    genres: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}

/// Create movie routes
pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route(
            "/:id",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .layer(DefaultBodyLimit::max(MAX_POSTER_BYTES + 1024 * 1024))
}

/// List movies with paging, sorting and filters
#[utoipa::path(
    get,
    path = "/api/movies",
    tag = "Movies",
    params(MovieListParams),
    responses(
        (status = 200, description = "One page of movies", body = MoviePage),
        (status = 400, description = "Invalid sort or filters")
    )
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> AppResult<Json<Page<Movie>>> {
    let page = PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref());
    let query = MovieQuery::from_request(
        params.filters.as_deref(),
        params.sort_by.as_deref(),
        params.sort_order.as_deref(),
    )?;

    let movies = state.movie_service.list(query, page).await?;
    Ok(Json(movies))
}

/// Get a movie by ID
#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    tag = "Movies",
    params(("id" = Uuid, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie found", body = Movie),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Movie>> {
    let movie = state.movie_service.get(id).await?;
    Ok(Json(movie))
}

/// Create a movie
#[utoipa::path(
    post,
    path = "/api/movies",
    tag = "Movies",
    request_body(content = MovieFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Movie created", body = Movie),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn create_movie(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Created<Movie>> {
    let form = read_movie_form(multipart).await?;
    let movie = state.movie_service.create(form).await?;
    Ok(Created(movie))
}

/// Update a movie. Only present fields change.
#[utoipa::path(
    put,
    path = "/api/movies/{id}",
    tag = "Movies",
    params(("id" = Uuid, Path, description = "Movie ID")),
    request_body(content = MovieFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Movie updated", body = Movie),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Movie>> {
    let form = read_movie_form(multipart).await?;
    let movie = state.movie_service.update(id, form).await?;
    Ok(Json(movie))
}

/// Delete a movie and its poster
#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    tag = "Movies",
    params(("id" = Uuid, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "The deleted movie", body = Movie),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Movie>> {
    let movie = state.movie_service.delete(id).await?;
    Ok(Json(movie))
}

/// Collect the multipart fields into a form. Empty text fields count as absent.
async fn read_movie_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<MovieForm> {
    let mut multipart = multipart.map_err(|e| AppError::bad_request(e.body_text()))?;
    let mut form = MovieForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == POSTER_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            // Browsers send an empty part when no file was chosen.
            if !bytes.is_empty() {
                form.poster = Some(PosterUpload {
                    bytes: bytes.to_vec(),
                    file_name,
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match name.as_str() {
            "title" => form.title = Some(value.to_string()),
            "releaseDate" => form.release_date = Some(parse_release_date(value)?),
            "trailerLink" => form.trailer_link = Some(value.to_string()),
            "genres" | "genres[]" => form
                .genres
                .get_or_insert_with(Vec::new)
                .extend(value.split(',').map(str::to_string)),
            other => tracing::debug!(field = %other, "Ignoring unknown movie form field"),
        }
    }

    Ok(form)
}

/// Accept a plain date or an RFC 3339 timestamp.
fn parse_release_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::bad_request(format!("Invalid releaseDate: {}", value)))
}
