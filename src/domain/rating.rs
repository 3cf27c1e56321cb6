//! Rating domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A user's rating of a movie. At most one per (user, movie).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub movie_id: Uuid,
    #[schema(example = 8.5)]
    pub rating: f64,
    #[schema(example = "Slow burn, worth it.")]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Data for a new rating
#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    pub user_id: Uuid,
    pub movie_id: Uuid,
    pub rating: f64,
    pub comment: String,
}
