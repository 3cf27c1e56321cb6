//! Domain layer - catalog entities, the list query model and value objects.
//!
//! Nothing here touches HTTP or the database.

pub mod filter;
pub mod movie;
pub mod password;
pub mod rating;
pub mod role;
pub mod user;

pub use filter::{
    GenresFilter, MovieCriterion, MovieFilters, MovieQuery, MovieSort, SortDirection, SortField,
    YearFilter,
};
pub use movie::{is_uploaded_poster, normalize_genres, Movie, MovieChanges, NewMovie};
pub use password::Password;
pub use rating::{NewRating, Rating};
pub use role::{NewRole, Role};
pub use user::{User, UserResponse};
