//! Auth endpoint integration tests

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;
use tower::util::ServiceExt;

use common::{body_json, get, get_admin, post_json, test_app, ADMIN_PASSWORD, ADMIN_USERNAME};

#[sqlx::test(migrations = "../../migrations")]
async fn login_returns_usable_token(pool: SqlitePool) {
    let (app, _dir) = test_app(pool).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            &json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let me = axum::http::Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("authorization", format!("Bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(me).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], ADMIN_USERNAME);
}

#[sqlx::test(migrations = "../../migrations")]
async fn login_with_wrong_password_is_401(pool: SqlitePool) {
    let (app, _dir) = test_app(pool).await;

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            &json!({ "username": ADMIN_USERNAME, "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../migrations")]
async fn admin_endpoints_reject_missing_token(pool: SqlitePool) {
    let (app, _dir) = test_app(pool).await;

    let response = app
        .oneshot(get("/api/contact-messages"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn logout_revokes_the_session(pool: SqlitePool) {
    let (app, _dir) = test_app(pool).await;

    let logout = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .header("authorization", format!("Bearer {}", common::ADMIN_TOKEN))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.clone().oneshot(logout).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The token no longer works.
    let response = app.oneshot(get_admin("/api/auth/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
