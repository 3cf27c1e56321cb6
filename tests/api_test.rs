//! Integration tests for API endpoints.
//!
//! These drive the full router over in-memory repositories and a scratch
//! poster directory, without a database.

mod common;

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use common::{encode, get, json_request, multipart_request, with_bearer, TestApp};
use movie_catalog::domain::NewMovie;
use movie_catalog::infra::MovieRepository;

async fn seed_movie(app: &TestApp, title: &str, released: (i32, u32, u32), genres: &[&str]) -> Uuid {
    let movie = MovieRepository::create(
        app.db.as_ref(),
        NewMovie {
            title: title.to_string(),
            release_date: NaiveDate::from_ymd_opt(released.0, released.1, released.2).unwrap(),
            trailer_link: String::new(),
            poster_url: "no-image.jpg".to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        },
    )
    .await
    .unwrap();
    movie.id
}

// =============================================================================
// Service endpoints
// =============================================================================

#[tokio::test]
async fn test_root_and_health_without_database() {
    let app = TestApp::new();

    let response = app.send(get("/")).await;
    assert_eq!(response.status(), 200);

    let (status, body) = app.send_json(get("/health")).await;
    assert_eq!(status, 503);
    assert_eq!(body["services"]["database"]["status"], "unconfigured");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();

    let (status, body) = app.send_json(get("/api-docs/openapi.json")).await;
    assert_eq!(status, 200);
    assert!(body["paths"]["/api/movies"].is_object());
}

// =============================================================================
// Movie listing
// =============================================================================

#[tokio::test]
async fn test_list_empty_catalog() {
    let app = TestApp::new();

    let (status, body) = app.send_json(get("/api/movies?page=1&limit=10")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "items": [], "currentPage": 1, "totalPages": 0 }));
}

#[tokio::test]
async fn test_list_paging_defaults_and_sorting() {
    let app = TestApp::new();
    seed_movie(&app, "Heat", (1995, 12, 15), &["crime"]).await;
    seed_movie(&app, "Arrival", (2016, 11, 11), &["drama", "sci-fi"]).await;
    seed_movie(&app, "Blade Runner 2049", (2017, 10, 6), &["sci-fi"]).await;

    // Invalid paging values fall back to 1/10; default sort is newest first
    let (status, body) = app.send_json(get("/api/movies?page=abc&limit=0")).await;
    assert_eq!(status, 200);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["items"][0]["title"], "Blade Runner 2049");
    assert_eq!(body["items"][2]["title"], "Heat");

    let (_, body) = app
        .send_json(get("/api/movies?sortBy=title&sortOrder=asc&limit=2&page=2"))
        .await;
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["title"], "Heat");
}

#[tokio::test]
async fn test_list_with_out_of_range_page() {
    let app = TestApp::new();
    seed_movie(&app, "Heat", (1995, 12, 15), &["crime"]).await;

    let (status, body) = app
        .send_json(get("/api/movies?page=18446744073709551615&limit=10"))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["items"][0]["title"], "Heat");
}

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new();
    seed_movie(&app, "Arrival", (2016, 11, 11), &["drama", "sci-fi"]).await;
    seed_movie(&app, "Moonlight", (2016, 10, 21), &["drama"]).await;
    seed_movie(&app, "Dark City", (1998, 2, 27), &["sci-fi"]).await;

    let uri = format!(
        "/api/movies?filters={}",
        encode(r#"{"genres":["drama","sci-fi"]}"#)
    );
    let (_, body) = app.send_json(get(&uri)).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["title"], "Arrival");

    let uri = format!("/api/movies?filters={}", encode(r#"{"year":"2016"}"#));
    let (_, body) = app.send_json(get(&uri)).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let uri = format!("/api/movies?filters={}", encode(r#"{"title":"DARK"}"#));
    let (_, body) = app.send_json(get(&uri)).await;
    assert_eq!(body["items"][0]["title"], "Dark City");
}

#[tokio::test]
async fn test_list_rejects_bad_filters_and_sort() {
    let app = TestApp::new();

    let uri = format!("/api/movies?filters={}", encode("{not json"));
    let (status, body) = app.send_json(get(&uri)).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["message"], "Invalid filters JSON");

    let uri = format!("/api/movies?filters={}", encode(r#"{"director":"Villeneuve"}"#));
    let (status, body) = app.send_json(get(&uri)).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, _) = app.send_json(get("/api/movies?sortBy=rating")).await;
    assert_eq!(status, 400);

    let (status, _) = app.send_json(get("/api/movies?sortOrder=sideways")).await;
    assert_eq!(status, 400);
}

// =============================================================================
// Movie CRUD and posters
// =============================================================================

#[tokio::test]
async fn test_create_get_and_missing_movie() {
    let app = TestApp::new();

    let request = multipart_request(
        "POST",
        "/api/movies",
        &[
            ("title", "Arrival"),
            ("releaseDate", "2016-11-11"),
            ("genres", "drama, sci-fi"),
            ("genres", "drama"),
        ],
        None,
    );
    let (status, created) = app.send_json(request).await;
    assert_eq!(status, 201);
    assert_eq!(created["posterUrl"], "no-image.jpg");
    assert_eq!(created["releaseDate"], "2016-11-11");
    assert_eq!(created["genres"], json!(["drama", "sci-fi"]));

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = app.send_json(get(&format!("/api/movies/{}", id))).await;
    assert_eq!(status, 200);
    assert_eq!(fetched, created);

    let (status, body) = app
        .send_json(get(&format!("/api/movies/{}", Uuid::new_v4())))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_requires_title() {
    let app = TestApp::new();

    let request = multipart_request("POST", "/api/movies", &[("releaseDate", "2016-11-11")], None);
    let (status, body) = app.send_json(request).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_poster_replacement_and_delete() {
    let app = TestApp::new();

    let request = multipart_request(
        "POST",
        "/api/movies",
        &[("title", "Arrival"), ("releaseDate", "2016-11-11")],
        Some(("first.png", b"first-poster")),
    );
    let (status, created) = app.send_json(request).await;
    assert_eq!(status, 201);
    let id = created["id"].as_str().unwrap().to_string();
    let first = created["posterUrl"].as_str().unwrap().to_string();
    assert!(first.ends_with(".png"));
    assert!(app.poster_exists(&first));

    // Served back under /static
    let response = app.send(get(&format!("/static/{}", first))).await;
    assert_eq!(response.status(), 200);

    let request = multipart_request(
        "PUT",
        &format!("/api/movies/{}", id),
        &[("trailerLink", "https://example.com/trailer")],
        Some(("second.jpg", b"second-poster")),
    );
    let (status, updated) = app.send_json(request).await;
    assert_eq!(status, 200);
    let second = updated["posterUrl"].as_str().unwrap().to_string();
    assert_ne!(first, second);
    assert_eq!(updated["title"], "Arrival");
    assert_eq!(updated["trailerLink"], "https://example.com/trailer");
    assert!(!app.poster_exists(&first));
    assert!(app.poster_exists(&second));

    let request = axum::http::Request::builder()
        .method("DELETE")
        .uri(format!("/api/movies/{}", id))
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, deleted) = app.send_json(request).await;
    assert_eq!(status, 200);
    assert_eq!(deleted["posterUrl"], second.as_str());
    assert!(!app.poster_exists(&second));

    let (status, _) = app.send_json(get(&format!("/api/movies/{}", id))).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_update_missing_movie() {
    let app = TestApp::new();

    let request = multipart_request(
        "PUT",
        &format!("/api/movies/{}", Uuid::new_v4()),
        &[("title", "Nothing")],
        None,
    );
    let (status, _) = app.send_json(request).await;
    assert_eq!(status, 404);
}

// =============================================================================
// Ratings
// =============================================================================

#[tokio::test]
async fn test_duplicate_rating_is_rejected() {
    let app = TestApp::new();
    let movie_id = seed_movie(&app, "Heat", (1995, 12, 15), &["crime"]).await;
    let body = json!({
        "userId": Uuid::new_v4(),
        "movieId": movie_id,
        "rating": 9,
        "comment": "Diner scene."
    });

    let (status, first) = app.send_json(json_request("POST", "/api/ratings", &body)).await;
    assert_eq!(status, 201);
    assert_eq!(first["message"], "Movie rating added successfully.");

    let (status, second) = app.send_json(json_request("POST", "/api/ratings", &body)).await;
    assert_eq!(status, 400);
    assert_eq!(second["error"]["message"], "You have already rated this movie.");

    let (status, ratings) = app
        .send_json(get(&format!("/api/movies/{}/ratings", movie_id)))
        .await;
    assert_eq!(status, 200);
    assert_eq!(ratings.as_array().unwrap().len(), 1);
    assert_eq!(ratings[0]["comment"], "Diner scene.");
}

#[tokio::test]
async fn test_rating_validation() {
    let app = TestApp::new();
    let movie_id = seed_movie(&app, "Heat", (1995, 12, 15), &[]).await;

    let out_of_range = json!({ "userId": Uuid::new_v4(), "movieId": movie_id, "rating": 11 });
    let (status, body) = app
        .send_json(json_request("POST", "/api/ratings", &out_of_range))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let unknown_movie = json!({ "userId": Uuid::new_v4(), "movieId": Uuid::new_v4(), "rating": 5 });
    let (status, _) = app
        .send_json(json_request("POST", "/api/ratings", &unknown_movie))
        .await;
    assert_eq!(status, 404);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_login_profile() {
    let app = TestApp::new();
    let credentials = json!({ "email": "critic@example.com", "password": "popcorn-night" });

    let (status, user) = app
        .send_json(json_request("POST", "/api/auth/register", &credentials))
        .await;
    assert_eq!(status, 201);
    assert_eq!(user["roles"], json!(["user"]));
    assert!(user.get("passwordHash").is_none());

    let (status, _) = app
        .send_json(json_request("POST", "/api/auth/register", &credentials))
        .await;
    assert_eq!(status, 400);

    let (status, token) = app
        .send_json(json_request("POST", "/api/auth/login", &credentials))
        .await;
    assert_eq!(status, 200);
    assert_eq!(token["tokenType"], "Bearer");
    assert_eq!(token["expiresIn"], 15 * 86_400);

    let access_token = token["accessToken"].as_str().unwrap();
    let (status, profile) = app
        .send_json(with_bearer(get("/api/profile"), access_token))
        .await;
    assert_eq!(status, 200);
    assert_eq!(profile["email"], "critic@example.com");
    assert_eq!(profile["id"], user["id"]);
}

#[tokio::test]
async fn test_profile_requires_valid_token() {
    let app = TestApp::new();

    let (status, body) = app.send_json(get("/api/profile")).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, body) = app
        .send_json(with_bearer(get("/api/profile"), "not.a.token"))
        .await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new();
    app.token_for("viewer@example.com", "correct-horse").await;

    let body = json!({ "email": "viewer@example.com", "password": "wrong-horse" });
    let (status, body) = app.send_json(json_request("POST", "/api/auth/login", &body)).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

// =============================================================================
// Roles
// =============================================================================

#[tokio::test]
async fn test_roles_are_public_to_read() {
    let app = TestApp::new();

    let (status, roles) = app.send_json(get("/api/roles")).await;
    assert_eq!(status, 200);
    let names: Vec<&str> = roles
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["admin", "user"]);

    let id = roles[0]["id"].as_str().unwrap();
    let (status, role) = app.send_json(get(&format!("/api/roles/{}", id))).await;
    assert_eq!(status, 200);
    assert_eq!(role["name"], "admin");

    let (status, _) = app
        .send_json(get(&format!("/api/roles/{}", Uuid::new_v4())))
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_role_writes_require_admin() {
    let app = TestApp::new();
    let new_role = json!({ "name": "critic", "description": "Featured reviews" });

    let (status, _) = app
        .send_json(json_request("POST", "/api/roles", &new_role))
        .await;
    assert_eq!(status, 401);

    let user_token = app.token_for("curator@example.com", "curate-all-day").await;
    let (status, body) = app
        .send_json(with_bearer(json_request("POST", "/api/roles", &new_role), &user_token))
        .await;
    assert_eq!(status, 403);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    app.state
        .role_service
        .grant("curator@example.com", "admin")
        .await
        .unwrap();
    let admin_token = app.token_for("curator@example.com", "curate-all-day").await;

    let (status, role) = app
        .send_json(with_bearer(json_request("POST", "/api/roles", &new_role), &admin_token))
        .await;
    assert_eq!(status, 201);
    assert_eq!(role["name"], "critic");

    let (status, _) = app
        .send_json(with_bearer(json_request("POST", "/api/roles", &new_role), &admin_token))
        .await;
    assert_eq!(status, 400);

    let delete = axum::http::Request::builder()
        .method("DELETE")
        .uri(format!("/api/roles/{}", role["id"].as_str().unwrap()))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(with_bearer(delete, &admin_token)).await;
    assert_eq!(response.status(), 204);
}
