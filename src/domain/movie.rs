//! Movie domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::DEFAULT_POSTER;

/// Movie catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Arrival")]
    pub title: String,
    #[schema(value_type = String, format = Date, example = "2016-11-11")]
    pub release_date: NaiveDate,
    #[schema(example = "https://www.youtube.com/watch?v=tFMo3UJ4B4g")]
    pub trailer_link: String,
    /// Stored poster file name, or `no-image.jpg` when none was uploaded
    #[schema(example = "no-image.jpg")]
    pub poster_url: String,
    #[schema(example = json!(["drama", "sci-fi"]))]
    pub genres: Vec<String>,
}

impl Movie {
    /// True when the poster refers to an uploaded file rather than the sentinel.
    pub fn has_uploaded_poster(&self) -> bool {
        is_uploaded_poster(&self.poster_url)
    }
}

/// Data for a new catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub release_date: NaiveDate,
    pub trailer_link: String,
    pub poster_url: String,
    pub genres: Vec<String>,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub trailer_link: Option<String>,
    pub poster_url: Option<String>,
    pub genres: Option<Vec<String>>,
}

impl MovieChanges {
    /// Apply the changes onto a movie.
    pub fn apply_to(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(release_date) = self.release_date {
            movie.release_date = release_date;
        }
        if let Some(trailer_link) = self.trailer_link {
            movie.trailer_link = trailer_link;
        }
        if let Some(poster_url) = self.poster_url {
            movie.poster_url = poster_url;
        }
        if let Some(genres) = self.genres {
            movie.genres = genres;
        }
    }
}

/// True unless the value is empty or the "no image" sentinel.
pub fn is_uploaded_poster(poster_url: &str) -> bool {
    !poster_url.is_empty() && poster_url != DEFAULT_POSTER
}

/// Normalize a genre list into a set: trimmed, non-empty, first occurrence kept.
pub fn normalize_genres<I, S>(genres: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for genre in genres {
        let genre = genre.as_ref().trim();
        if !genre.is_empty() && !normalized.iter().any(|g| g == genre) {
            normalized.push(genre.to_string());
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(poster_url: &str) -> Movie {
        Movie {
            id: Uuid::new_v4(),
            title: "Heat".to_string(),
            release_date: NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
            trailer_link: String::new(),
            poster_url: poster_url.to_string(),
            genres: vec!["crime".to_string()],
        }
    }

    #[test]
    fn test_normalize_genres() {
        let genres = normalize_genres(["  drama", "", "sci-fi ", "drama", "   "]);
        assert_eq!(genres, vec!["drama", "sci-fi"]);
    }

    #[test]
    fn test_sentinel_poster_is_not_uploaded() {
        assert!(!movie(DEFAULT_POSTER).has_uploaded_poster());
        assert!(!movie("").has_uploaded_poster());
        assert!(movie("4b1d.jpg").has_uploaded_poster());
    }

    #[test]
    fn test_changes_keep_unset_fields() {
        let mut m = movie(DEFAULT_POSTER);
        MovieChanges {
            title: Some("Heat (Director's Cut)".to_string()),
            ..Default::default()
        }
        .apply_to(&mut m);

        assert_eq!(m.title, "Heat (Director's Cut)");
        assert_eq!(m.genres, vec!["crime"]);
        assert_eq!(m.poster_url, DEFAULT_POSTER);
    }
}
