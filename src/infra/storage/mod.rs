//! Poster file storage.
//!
//! Uploaded posters live under the static directory and are served
//! back by the `/static` route. Only the generated file name is stored
//! on the movie.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::config::MAX_POSTER_BYTES;
use crate::domain::is_uploaded_poster;
use crate::errors::{AppError, AppResult};

/// Storage for uploaded poster images
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PosterStorage: Send + Sync {
    /// Persist an upload and return the generated file name.
    async fn save(&self, bytes: Vec<u8>, original_name: Option<String>) -> AppResult<String>;

    /// Remove a stored poster. Missing files and the default poster are ignored.
    async fn delete(&self, file_name: &str) -> AppResult<()>;
}

/// Poster storage on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalPosterStorage {
    root: PathBuf,
}

impl LocalPosterStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, file_name: &str) -> AppResult<PathBuf> {
        // Stored names are generated, never user paths.
        if file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Err(AppError::bad_request("Invalid poster file name"));
        }
        Ok(self.root.join(file_name))
    }
}

#[async_trait]
impl PosterStorage for LocalPosterStorage {
    async fn save(&self, bytes: Vec<u8>, original_name: Option<String>) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::validation("Poster file is empty"));
        }
        if bytes.len() > MAX_POSTER_BYTES {
            return Err(AppError::validation(format!(
                "Poster exceeds {} bytes",
                MAX_POSTER_BYTES
            )));
        }

        tokio::fs::create_dir_all(&self.root).await?;

        let file_name = generated_name(original_name.as_deref());
        let path = self.path_for(&file_name)?;
        tokio::fs::write(&path, &bytes).await?;

        tracing::info!(file = %file_name, size = bytes.len(), "Stored poster");
        Ok(file_name)
    }

    async fn delete(&self, file_name: &str) -> AppResult<()> {
        if !is_uploaded_poster(file_name) {
            return Ok(());
        }

        let path = self.path_for(file_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(file = %file_name, "Deleted poster");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(file = %file_name, "Poster already gone");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Random name keeping a short alphanumeric extension from the upload.
fn generated_name(original_name: Option<&str>) -> String {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    }
}
