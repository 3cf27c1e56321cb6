//! Rating persistence.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::rating::{self, ActiveModel, Entity as RatingEntity};
use crate::domain::{NewRating, Rating};
use crate::errors::AppResult;

/// Rating repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn find_by_user_and_movie(&self, user_id: Uuid, movie_id: Uuid)
        -> AppResult<Option<Rating>>;

    /// Insert a rating. A second rating for the same (user, movie) pair
    /// fails with a conflict from the unique index.
    async fn create(&self, rating: NewRating) -> AppResult<Rating>;

    /// Ratings of one movie, newest first
    async fn list_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<Rating>>;
}

/// SeaORM-backed rating repository
#[derive(Clone)]
pub struct RatingStore {
    db: DatabaseConnection,
}

impl RatingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for RatingStore {
    async fn find_by_user_and_movie(
        &self,
        user_id: Uuid,
        movie_id: Uuid,
    ) -> AppResult<Option<Rating>> {
        let model = RatingEntity::find()
            .filter(rating::Column::UserId.eq(user_id))
            .filter(rating::Column::MovieId.eq(movie_id))
            .one(&self.db)
            .await?;

        Ok(model.map(Rating::from))
    }

    async fn create(&self, rating: NewRating) -> AppResult<Rating> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(rating.user_id),
            movie_id: Set(rating.movie_id),
            rating: Set(rating.rating),
            comment: Set(rating.comment),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await?;

        Ok(Rating::from(model))
    }

    async fn list_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<Rating>> {
        let models = RatingEntity::find()
            .filter(rating::Column::MovieId.eq(movie_id))
            .order_by_desc(rating::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Rating::from).collect())
    }
}
