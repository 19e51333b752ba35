#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use learnhub_api::auth::jwt::{generate_access_token, generate_named_access_token, JwtConfig};
use learnhub_api::config::{ServerConfig, StoreBackend};
use learnhub_api::router::build_app_router;
use learnhub_api::state::AppState;
use learnhub_core::roles::{ROLE_INSTRUCTOR, ROLE_STUDENT};
use learnhub_core::types::DbId;
use learnhub_db::store::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over a fresh [`MemoryStore`].
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack. The returned router is cheap to clone;
/// clones share the store.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState::new(Arc::new(MemoryStore::new()), config.clone());
    build_app_router(state, &config)
}

pub fn instructor_token(user_id: DbId) -> String {
    token(user_id, ROLE_INSTRUCTOR)
}

pub fn student_token(user_id: DbId) -> String {
    token(user_id, ROLE_STUDENT)
}

/// Student token carrying a display name claim.
pub fn named_student_token(user_id: DbId, name: &str) -> String {
    generate_named_access_token(user_id, ROLE_STUDENT, Some(name), &test_config().jwt)
        .expect("token generation")
}

fn token(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Body,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, Body::empty()).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, Body::empty()).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    json: Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Body::from(json.to_string())).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    json: Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, token, Body::from(json.to_string())).await
}

/// POST a body verbatim, for endpoints that must cope with malformed JSON.
pub async fn post_raw(app: &Router, uri: &str, token: Option<&str>, raw: &str) -> Response<Body> {
    send(app, Method::POST, uri, token, Body::from(raw.to_string())).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding through the API
// ---------------------------------------------------------------------------

pub async fn create_subject(app: &Router, token: &str, name: &str) -> DbId {
    let body = serde_json::json!({ "name": name });
    let response = post_json(app, "/api/v1/subjects", Some(token), body).await;
    assert_eq!(response.status(), 201, "create subject");
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

pub async fn create_course(
    app: &Router,
    token: &str,
    subject_id: DbId,
    title: &str,
    published: bool,
) -> DbId {
    let response = post_json(
        app,
        "/api/v1/courses",
        Some(token),
        serde_json::json!({
            "subject_id": subject_id,
            "title": title,
            "overview": format!("All about {title}"),
            "is_published": published,
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "create course");
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

pub async fn create_module(app: &Router, token: &str, course_id: DbId, title: &str) -> DbId {
    let response = post_json(
        app,
        &format!("/api/v1/courses/{course_id}/modules"),
        Some(token),
        serde_json::json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), 201, "create module");
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a text content item and return the response `data`.
pub async fn create_text(app: &Router, token: &str, module_id: DbId, text: &str) -> Value {
    let response = post_json(
        app,
        &format!("/api/v1/modules/{module_id}/contents/text"),
        Some(token),
        serde_json::json!({ "title": text, "text": text }),
    )
    .await;
    assert_eq!(response.status(), 201, "create text content");
    body_json(response).await["data"].clone()
}

/// One instructor's published course with one module.
pub struct Seed {
    pub app: Router,
    pub instructor: String,
    pub subject_id: DbId,
    pub course_id: DbId,
    pub module_id: DbId,
}

pub const INSTRUCTOR_ID: DbId = 1;

pub async fn seed() -> Seed {
    let app = build_test_app();
    let instructor = instructor_token(INSTRUCTOR_ID);
    let subject_id = create_subject(&app, &instructor, "Mathematics").await;
    let course_id = create_course(&app, &instructor, subject_id, "Linear Algebra", true).await;
    let module_id = create_module(&app, &instructor, course_id, "Vectors").await;
    Seed {
        app,
        instructor,
        subject_id,
        course_id,
        module_id,
    }
}
