//! Shared helpers for API integration tests

// Each test binary compiles this module separately and uses a subset.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

use lcp_server::auth::{hash_password, InMemorySessionStore, Session, SessionHandle, SessionStore};
use lcp_server::features::{self, FeatureState};
use lcp_server::storage::DocumentStore;

/// Bearer token pre-seeded into the session store for admin requests.
pub const ADMIN_TOKEN: &str = "test-admin-token";

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cret";

/// Build the API router backed by the given pool, with a seeded admin
/// account and a live session for [`ADMIN_TOKEN`].
///
/// The returned `TempDir` owns the document store directory; keep it alive
/// for the duration of the test.
pub async fn test_app(pool: SqlitePool) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let documents = DocumentStore::new(dir.path()).unwrap();

    let password_hash = hash_password(ADMIN_PASSWORD).unwrap();
    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO admin_users (username, password_hash) VALUES (?1, ?2) RETURNING id",
    )
    .bind(ADMIN_USERNAME)
    .bind(password_hash)
    .fetch_one(&pool)
    .await
    .unwrap();

    let store = InMemorySessionStore::new();
    store
        .insert(Session {
            token: ADMIN_TOKEN.to_string(),
            user_id,
            username: ADMIN_USERNAME.to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        })
        .await;
    let sessions: SessionHandle = Arc::new(store);

    let state = FeatureState {
        db: pool,
        documents,
        sessions,
        session_ttl_secs: 3600,
    };

    let app = Router::new().nest("/api", features::router(state));
    (app, dir)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_admin(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_json_admin(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn put_json_admin(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn delete_admin(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Build a multipart/form-data request with a single `file` part.
pub fn post_multipart_file_admin(uri: &str, filename: &str, content: &[u8]) -> Request<Body> {
    post_multipart_admin(uri, &[("file", Some(filename), content)])
}

/// Build a multipart/form-data request from (name, filename, bytes) parts.
pub fn post_multipart_admin(
    uri: &str,
    parts: &[(&str, Option<&str>, &[u8])],
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => {
                let content_type = if filename.ends_with(".pdf") {
                    "application/pdf"
                } else if filename.ends_with(".csv") {
                    "text/csv"
                } else {
                    "application/octet-stream"
                };
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
            },
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            },
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
