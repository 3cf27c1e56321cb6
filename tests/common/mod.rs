//! Shared helpers for integration tests: an in-memory Unit of Work and
//! request builders for the full router.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use movie_catalog::api::{create_router, AppState};
use movie_catalog::domain::{Movie, MovieQuery, NewMovie, NewRating, NewRole, Rating, Role, User};
use movie_catalog::errors::{AppError, AppResult};
use movie_catalog::infra::{
    LocalPosterStorage, MovieRepository, RatingRepository, RoleRepository, UnitOfWork,
    UserRepository,
};
use movie_catalog::services::{Services, TokenService};
use movie_catalog::types::PageRequest;

pub const SECRET: &[u8] = b"integration-test-secret-32-bytes-long!";

/// Tables kept in memory, mirroring the unique indexes of the schema.
#[derive(Default)]
pub struct InMemoryDb {
    pub movies: Mutex<Vec<Movie>>,
    pub ratings: Mutex<Vec<Rating>>,
    pub roles: Mutex<Vec<Role>>,
    pub users: Mutex<Vec<User>>,
}

impl InMemoryDb {
    /// Seeded like the migrations: `user` and `admin` roles.
    pub fn seeded() -> Self {
        let db = Self::default();
        {
            let mut roles = db.roles.lock().unwrap();
            for (name, description) in [("admin", "Administrator"), ("user", "Registered user")] {
                roles.push(Role {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    description: description.to_string(),
                });
            }
        }
        db
    }
}

#[async_trait]
impl MovieRepository for InMemoryDb {
    async fn find_page(&self, query: &MovieQuery, page: PageRequest) -> AppResult<(Vec<Movie>, u64)> {
        let mut matching: Vec<Movie> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| query.matches(m))
            .cloned()
            .collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok((items, total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Movie>> {
        Ok(self.movies.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, movie: NewMovie) -> AppResult<Movie> {
        let movie = Movie {
            id: Uuid::new_v4(),
            title: movie.title,
            release_date: movie.release_date,
            trailer_link: movie.trailer_link,
            poster_url: movie.poster_url,
            genres: movie.genres,
        };
        self.movies.lock().unwrap().push(movie.clone());
        Ok(movie)
    }

    async fn update(&self, movie: Movie) -> AppResult<Movie> {
        let mut movies = self.movies.lock().unwrap();
        let slot = movies
            .iter_mut()
            .find(|m| m.id == movie.id)
            .ok_or(AppError::NotFound)?;
        *slot = movie.clone();
        Ok(movie)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut movies = self.movies.lock().unwrap();
        let before = movies.len();
        movies.retain(|m| m.id != id);
        Ok(movies.len() < before)
    }
}

#[async_trait]
impl RatingRepository for InMemoryDb {
    async fn find_by_user_and_movie(&self, user_id: Uuid, movie_id: Uuid) -> AppResult<Option<Rating>> {
        Ok(self
            .ratings
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id && r.movie_id == movie_id)
            .cloned())
    }

    async fn create(&self, rating: NewRating) -> AppResult<Rating> {
        let mut ratings = self.ratings.lock().unwrap();
        if ratings
            .iter()
            .any(|r| r.user_id == rating.user_id && r.movie_id == rating.movie_id)
        {
            return Err(AppError::conflict("Resource already exists"));
        }
        let rating = Rating {
            id: Uuid::new_v4(),
            user_id: rating.user_id,
            movie_id: rating.movie_id,
            rating: rating.rating,
            comment: rating.comment,
            created_at: Utc::now(),
        };
        ratings.push(rating.clone());
        Ok(rating)
    }

    async fn list_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<Rating>> {
        let mut ratings: Vec<Rating> = self
            .ratings
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.movie_id == movie_id)
            .cloned()
            .collect();
        ratings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ratings)
    }
}

#[async_trait]
impl RoleRepository for InMemoryDb {
    async fn list(&self) -> AppResult<Vec<Role>> {
        let mut roles = self.roles.lock().unwrap().clone();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        Ok(self.roles.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        Ok(self.roles.lock().unwrap().iter().find(|r| r.name == name).cloned())
    }

    async fn create(&self, role: NewRole) -> AppResult<Role> {
        let mut roles = self.roles.lock().unwrap();
        if roles.iter().any(|r| r.name == role.name) {
            return Err(AppError::conflict("Resource already exists"));
        }
        let role = Role {
            id: Uuid::new_v4(),
            name: role.name,
            description: role.description,
        };
        roles.push(role.clone());
        Ok(role)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut roles = self.roles.lock().unwrap();
        let before = roles.len();
        roles.retain(|r| r.id != id);
        Ok(roles.len() < before)
    }
}

#[async_trait]
impl UserRepository for InMemoryDb {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, email: String, password_hash: String, roles: Vec<String>) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::conflict("Resource already exists"));
        }
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            roles,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_roles(&self, id: Uuid, roles: Vec<String>) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        user.roles = roles;
        Ok(user.clone())
    }
}

/// Unit of Work handing out the shared in-memory tables.
pub struct InMemoryUnitOfWork(pub Arc<InMemoryDb>);

impl UnitOfWork for InMemoryUnitOfWork {
    fn movies(&self) -> Arc<dyn MovieRepository> {
        self.0.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingRepository> {
        self.0.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.0.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.0.clone()
    }
}

/// Full router over in-memory storage and a scratch poster directory.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: Arc<InMemoryDb>,
    pub posters: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let posters = tempfile::tempdir().unwrap();
        let db = Arc::new(InMemoryDb::seeded());

        let services = Services::from_unit_of_work(
            Arc::new(InMemoryUnitOfWork(db.clone())),
            TokenService::new(Some(SECRET)),
            Arc::new(LocalPosterStorage::new(posters.path())),
        );
        let state = AppState::from_services(&services, posters.path());
        let router = create_router(state.clone());

        Self {
            router,
            state,
            db,
            posters,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send and decode a JSON response body.
    pub async fn send_json(&self, request: Request<Body>) -> (u16, Value) {
        let response = self.send(request).await;
        let status = response.status().as_u16();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub fn poster_exists(&self, file_name: &str) -> bool {
        self.posters.path().join(file_name).exists()
    }

    /// Register a user and log in, returning the access token.
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({ "email": email, "password": password });
        let (status, _) = self.send_json(json_request("POST", "/api/auth/register", &body)).await;
        assert!(status == 201 || status == 400, "register failed: {}", status);

        let (status, token) = self.send_json(json_request("POST", "/api/auth/login", &body)).await;
        assert_eq!(status, 200);
        token["accessToken"].as_str().unwrap().to_string()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );
    request
}

const BOUNDARY: &str = "----movie-catalog-test-boundary";

/// Build a multipart/form-data request with text fields and an optional image.
pub fn multipart_request(
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Percent-encode a query value.
pub fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => (b as char).to_string(),
            _ => format!("%{:02X}", b),
        })
        .collect()
}
