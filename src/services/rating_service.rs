//! Rating service - One rating per user per movie.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{MAX_RATING, MIN_RATING};
use crate::domain::{NewRating, Rating};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

pub const DUPLICATE_RATING_MESSAGE: &str = "You have already rated this movie.";

/// Rating service trait for dependency injection.
#[async_trait]
pub trait RatingService: Send + Sync {
    /// Record a rating. A second rating by the same user for the same
    /// movie is a conflict and writes nothing.
    async fn create(&self, rating: NewRating) -> AppResult<Rating>;

    /// Ratings of an existing movie
    async fn list_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<Rating>>;
}

/// Concrete implementation of RatingService using Unit of Work.
pub struct RatingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RatingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_movie_exists(&self, movie_id: Uuid) -> AppResult<()> {
        match self.uow.movies().find_by_id(movie_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> RatingService for RatingManager<U> {
    async fn create(&self, rating: NewRating) -> AppResult<Rating> {
        if !rating.rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating.rating) {
            return Err(AppError::validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        self.ensure_movie_exists(rating.movie_id).await?;

        let ratings = self.uow.ratings();
        if ratings
            .find_by_user_and_movie(rating.user_id, rating.movie_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(DUPLICATE_RATING_MESSAGE));
        }

        // A concurrent duplicate that slipped past the check hits the unique index.
        let created = ratings.create(rating).await.map_err(|e| match e {
            AppError::Conflict(_) => AppError::conflict(DUPLICATE_RATING_MESSAGE),
            other => other,
        })?;

        tracing::info!(
            rating_id = %created.id,
            movie_id = %created.movie_id,
            user_id = %created.user_id,
            "Rating created"
        );
        Ok(created)
    }

    async fn list_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<Rating>> {
        self.ensure_movie_exists(movie_id).await?;
        self.uow.ratings().list_for_movie(movie_id).await
    }
}
