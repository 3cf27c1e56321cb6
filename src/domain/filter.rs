//! Movie list query: typed filters, sort specification and the normalized
//! query they build into.
//!
//! The normalized [`MovieQuery`] is storage-agnostic. Repositories translate
//! its criteria into their own query language; [`MovieQuery::matches`]
//! evaluates the same criteria in memory.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use super::movie::{normalize_genres, Movie};
use crate::errors::{AppError, AppResult};

/// Client-supplied filter mapping. The key set is closed: unknown keys are
/// rejected during deserialization.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct MovieFilters {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Movie must carry every listed genre
    pub genres: Option<GenresFilter>,
    /// Release year
    pub year: Option<YearFilter>,
    /// Exact trailer link
    pub trailer_link: Option<String>,
    /// Exact poster reference
    pub poster_url: Option<String>,
}

/// Genre list, accepted either as a JSON array or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GenresFilter {
    List(Vec<String>),
    Text(String),
}

impl GenresFilter {
    fn into_list(self) -> Vec<String> {
        match self {
            GenresFilter::List(genres) => genres,
            GenresFilter::Text(raw) => raw.split(',').map(str::to_string).collect(),
        }
    }
}

/// Release year, accepted either as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearFilter {
    Number(i64),
    Text(String),
}

impl YearFilter {
    fn value(&self) -> AppResult<i32> {
        let year = match self {
            YearFilter::Number(n) => *n,
            YearFilter::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| AppError::bad_request(format!("Invalid year: {}", s)))?,
        };
        i32::try_from(year).map_err(|_| AppError::bad_request(format!("Invalid year: {}", year)))
    }
}

impl MovieFilters {
    /// Parse the JSON object sent in the `filters` query parameter.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|e| {
            if e.is_data() {
                AppError::bad_request(format!("Invalid filters: {}", e))
            } else {
                AppError::bad_request("Invalid filters JSON")
            }
        })
    }
}

/// A single normalized condition on a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieCriterion {
    /// Title contains the needle, ignoring case
    TitleContains(String),
    /// Genre set is a superset of these genres
    HasAllGenres(Vec<String>),
    /// Release date within `[from, until)`
    ReleasedBetween { from: NaiveDate, until: NaiveDate },
    TrailerLinkIs(String),
    PosterUrlIs(String),
}

impl MovieCriterion {
    /// Evaluate the criterion against a movie.
    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            MovieCriterion::TitleContains(needle) => movie
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            MovieCriterion::HasAllGenres(genres) => {
                genres.iter().all(|g| movie.genres.contains(g))
            }
            MovieCriterion::ReleasedBetween { from, until } => {
                *from <= movie.release_date && movie.release_date < *until
            }
            MovieCriterion::TrailerLinkIs(link) => movie.trailer_link == *link,
            MovieCriterion::PosterUrlIs(poster) => movie.poster_url == *poster,
        }
    }
}

/// Sortable movie fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    ReleaseDate,
    Title,
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "releaseDate" => Ok(SortField::ReleaseDate),
            "title" => Ok(SortField::Title),
            other => Err(AppError::bad_request(format!(
                "Unsupported sort field: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(AppError::bad_request(format!(
                "Unsupported sort order: {}",
                s
            ))),
        }
    }
}

/// Single `(field, direction)` sort. Defaults to newest release first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for MovieSort {
    fn default() -> Self {
        Self {
            field: SortField::ReleaseDate,
            direction: SortDirection::Desc,
        }
    }
}

impl MovieSort {
    /// Parse optional `sortBy` / `sortOrder` values; absent or empty values
    /// keep the defaults.
    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> AppResult<Self> {
        let mut sort = Self::default();
        if let Some(field) = sort_by.filter(|s| !s.is_empty()) {
            sort.field = field.parse()?;
        }
        if let Some(direction) = sort_order.filter(|s| !s.is_empty()) {
            sort.direction = direction.parse()?;
        }
        Ok(sort)
    }

    /// Compare two movies according to this sort.
    ///
    /// In-memory counterpart of the repository's `ORDER BY`; SQL-backed
    /// stores never call it, in-memory stores order with it.
    pub fn compare(&self, a: &Movie, b: &Movie) -> Ordering {
        let ordering = match self.field {
            SortField::ReleaseDate => a.release_date.cmp(&b.release_date),
            SortField::Title => a.title.cmp(&b.title),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Normalized list query: all criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    pub criteria: Vec<MovieCriterion>,
    pub sort: MovieSort,
}

impl MovieQuery {
    /// Build the normalized query from typed filters.
    pub fn build(filters: MovieFilters, sort: MovieSort) -> AppResult<Self> {
        let mut criteria = Vec::new();

        if let Some(title) = filters.title.filter(|t| !t.is_empty()) {
            criteria.push(MovieCriterion::TitleContains(title));
        }

        if let Some(genres) = filters.genres {
            let genres = normalize_genres(genres.into_list());
            if !genres.is_empty() {
                criteria.push(MovieCriterion::HasAllGenres(genres));
            }
        }

        if let Some(year) = filters.year {
            let (from, until) = year_range(year.value()?)?;
            criteria.push(MovieCriterion::ReleasedBetween { from, until });
        }

        if let Some(link) = filters.trailer_link {
            criteria.push(MovieCriterion::TrailerLinkIs(link));
        }

        if let Some(poster) = filters.poster_url {
            criteria.push(MovieCriterion::PosterUrlIs(poster));
        }

        Ok(Self { criteria, sort })
    }

    /// Build from raw request values: optional filters JSON plus sort params.
    pub fn from_request(
        filters: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> AppResult<Self> {
        let filters = match filters.map(str::trim).filter(|f| !f.is_empty()) {
            Some(raw) => MovieFilters::from_json(raw)?,
            None => MovieFilters::default(),
        };
        let sort = MovieSort::parse(sort_by, sort_order)?;
        Self::build(filters, sort)
    }

    /// True when every criterion holds for the movie.
    ///
    /// Reference semantics for the SQL translation in the movie repository:
    /// both must select the same movies. In-memory stores filter with it.
    pub fn matches(&self, movie: &Movie) -> bool {
        self.criteria.iter().all(|c| c.matches(movie))
    }
}

/// Half-open range `[year-01-01, (year+1)-01-01)`.
fn year_range(year: i32) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::bad_request(format!("Invalid year: {}", year));
    let from = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
    let until = year
        .checked_add(1)
        .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1))
        .ok_or_else(invalid)?;
    Ok((from, until))
}
