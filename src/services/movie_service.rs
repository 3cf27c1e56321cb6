//! Movie catalog service - Listing, CRUD and poster handling.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::DEFAULT_POSTER;
use crate::domain::{normalize_genres, Movie, MovieChanges, MovieQuery, NewMovie};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{PosterStorage, UnitOfWork};
use crate::types::{Page, PageRequest};

/// Uploaded poster image as received from the client
#[derive(Debug, Clone)]
pub struct PosterUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
}

/// Raw movie fields from a create or update form. Absent fields are `None`.
#[derive(Debug, Clone, Default)]
pub struct MovieForm {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub trailer_link: Option<String>,
    pub genres: Option<Vec<String>>,
    pub poster: Option<PosterUpload>,
}

/// Movie service trait for dependency injection.
#[async_trait]
pub trait MovieService: Send + Sync {
    /// One page of movies matching the query
    async fn list(&self, query: MovieQuery, page: PageRequest) -> AppResult<Page<Movie>>;

    async fn get(&self, id: Uuid) -> AppResult<Movie>;

    /// Create a movie. `title` and `release_date` are required.
    async fn create(&self, form: MovieForm) -> AppResult<Movie>;

    /// Apply the present fields. A new poster replaces and deletes the old one.
    async fn update(&self, id: Uuid, form: MovieForm) -> AppResult<Movie>;

    /// Delete a movie and its uploaded poster, returning the deleted movie
    async fn delete(&self, id: Uuid) -> AppResult<Movie>;
}

/// Concrete implementation of MovieService using Unit of Work.
pub struct MovieCatalog<U: UnitOfWork> {
    uow: Arc<U>,
    posters: Arc<dyn PosterStorage>,
}

impl<U: UnitOfWork> MovieCatalog<U> {
    pub fn new(uow: Arc<U>, posters: Arc<dyn PosterStorage>) -> Self {
        Self { uow, posters }
    }

    /// Best-effort removal of a replaced or orphaned poster.
    async fn discard_poster(&self, movie_id: Uuid, poster: &str) {
        if let Err(e) = self.posters.delete(poster).await {
            tracing::warn!(movie_id = %movie_id, poster = %poster, error = %e, "Failed to delete poster");
        }
    }
}

fn required_title(title: Option<String>) -> AppResult<String> {
    match title.map(|t| t.trim().to_string()) {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(AppError::validation("Title is required")),
    }
}

#[async_trait]
impl<U: UnitOfWork> MovieService for MovieCatalog<U> {
    async fn list(&self, query: MovieQuery, page: PageRequest) -> AppResult<Page<Movie>> {
        let (items, total) = self.uow.movies().find_page(&query, page).await?;
        Ok(Page::new(items, page, total))
    }

    async fn get(&self, id: Uuid) -> AppResult<Movie> {
        self.uow.movies().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create(&self, form: MovieForm) -> AppResult<Movie> {
        let title = required_title(form.title)?;
        let release_date = form
            .release_date
            .ok_or_else(|| AppError::validation("Release date is required"))?;

        let poster_url = match form.poster {
            Some(upload) => self.posters.save(upload.bytes, upload.file_name).await?,
            None => DEFAULT_POSTER.to_string(),
        };

        let movie = self
            .uow
            .movies()
            .create(NewMovie {
                title,
                release_date,
                trailer_link: form.trailer_link.unwrap_or_default(),
                poster_url,
                genres: normalize_genres(form.genres.unwrap_or_default()),
            })
            .await?;

        tracing::info!(movie_id = %movie.id, "Movie created");
        Ok(movie)
    }

    async fn update(&self, id: Uuid, form: MovieForm) -> AppResult<Movie> {
        let movies = self.uow.movies();
        let mut movie = movies.find_by_id(id).await?.ok_or_not_found()?;

        let title = match form.title {
            Some(title) => Some(required_title(Some(title))?),
            None => None,
        };

        let poster_url = match form.poster {
            Some(upload) => {
                let stored = self.posters.save(upload.bytes, upload.file_name).await?;
                if movie.has_uploaded_poster() {
                    self.discard_poster(id, &movie.poster_url).await;
                }
                Some(stored)
            }
            None => None,
        };

        MovieChanges {
            title,
            release_date: form.release_date,
            trailer_link: form.trailer_link,
            poster_url,
            genres: form.genres.map(normalize_genres),
        }
        .apply_to(&mut movie);

        let movie = movies.update(movie).await?;
        tracing::info!(movie_id = %movie.id, "Movie updated");
        Ok(movie)
    }

    async fn delete(&self, id: Uuid) -> AppResult<Movie> {
        let movies = self.uow.movies();
        let movie = movies.find_by_id(id).await?.ok_or_not_found()?;

        if !movies.delete(id).await? {
            return Err(AppError::NotFound);
        }
        if movie.has_uploaded_poster() {
            self.discard_poster(id, &movie.poster_url).await;
        }

        tracing::info!(movie_id = %id, "Movie deleted");
        Ok(movie)
    }
}
