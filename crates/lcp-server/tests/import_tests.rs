//! Bulk import and CSV export integration tests
//!
//! These exercise the fixed wire contract of the bulk-import family:
//! 201 with `{message, products, skipped}`, 400 with `{message}`, and the
//! export endpoint producing a file the import accepts back.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;
use tower::util::ServiceExt;

use common::{
    body_json, body_text, get_admin, post_json_admin, post_multipart_file_admin, test_app,
};

#[sqlx::test(migrations = "../../migrations")]
async fn bulk_import_json_batch(pool: SqlitePool) {
    let (app, _dir) = test_app(pool).await;

    let response = app
        .oneshot(post_json_admin(
            "/api/products/bulk-import",
            &json!({
                "products": [
                    { "code": "EL-1", "name": "Traction sheave", "slug": "traction-sheave" },
                    { "code": "EL-2", "name": "Guide rail", "slug": "guide-rail", "featured": true }
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "2 products imported successfully");
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["skipped"].as_array().unwrap().len(), 0);
    assert_eq!(body["products"][1]["featured"], true);
}

#[sqlx::test(migrations = "../../migrations")]
async fn bulk_import_reports_skipped_rows(pool: SqlitePool) {
    let (app, _dir) = test_app(pool.clone()).await;

    sqlx::query("INSERT INTO products (code, name, slug) VALUES ('X', 'Taken', 'taken')")
        .execute(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(post_json_admin(
            "/api/products/bulk-import",
            &json!({
                "products": [
                    { "code": "EL-1", "name": "Collides", "slug": "taken" },
                    { "code": "EL-2", "name": "Fine", "slug": "fine" },
                    { "code": "", "name": "No code", "slug": "no-code" }
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "1 products imported successfully");
    let skipped = body["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[0]["line"], 1);
    assert_eq!(skipped[0]["reason"], "slug 'taken' already exists");
    assert_eq!(skipped[1]["line"], 3);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn bulk_import_empty_array_is_400(pool: SqlitePool) {
    let (app, _dir) = test_app(pool).await;

    let response = app
        .oneshot(post_json_admin(
            "/api/products/bulk-import",
            &json!({ "products": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "No products provided");
}

#[sqlx::test(migrations = "../../migrations")]
async fn bulk_import_malformed_body_is_400_with_message(pool: SqlitePool) {
    let (app, _dir) = test_app(pool).await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/products/bulk-import")
        .header("authorization", format!("Bearer {}", common::ADMIN_TOKEN))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn import_csv_file_upload(pool: SqlitePool) {
    let (app, _dir) = test_app(pool.clone()).await;

    let csv = "code;name;featured\nEL-1;Traction sheave;oui\n;Missing code;\nEL-2;Guide rail;\n";
    let response = app
        .oneshot(post_multipart_file_admin(
            "/api/products/import-csv",
            "catalog.csv",
            csv.as_bytes(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "2 products imported successfully");
    let skipped = body["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["line"], 3);
    assert_eq!(skipped[0]["reason"], "missing required field(s): code");

    let slugs: Vec<String> = sqlx::query_scalar("SELECT slug FROM products ORDER BY code")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(slugs, vec!["traction-sheave", "guide-rail"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn import_csv_without_file_is_400(pool: SqlitePool) {
    let (app, _dir) = test_app(pool).await;

    let response = app
        .oneshot(common::post_multipart_admin(
            "/api/products/import-csv",
            &[("other", None, b"whatever".as_slice())],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "No file provided");
}

#[sqlx::test(migrations = "../../migrations")]
async fn export_csv_round_trips_through_import(pool: SqlitePool) {
    let (app, _dir) = test_app(pool.clone()).await;

    sqlx::query(
        "INSERT INTO products (code, name, slug, description, featured) \
         VALUES ('EL-1', 'Traction sheave', 'traction-sheave', 'Cast iron', 1)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let response = app
        .clone()
        .oneshot(get_admin("/api/products/export-csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let csv = body_text(response).await;
    assert!(csv.starts_with("code;name;description"));
    assert!(csv.contains("EL-1;Traction sheave;Cast iron"));

    // Re-importing the exported file collides on the existing slug.
    let response = app
        .oneshot(post_multipart_file_admin(
            "/api/products/import-csv",
            "export.csv",
            csv.as_bytes(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "0 products imported successfully");
    assert_eq!(
        body["skipped"][0]["reason"],
        "slug 'traction-sheave' already exists"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn export_template_has_header_and_sample_row(pool: SqlitePool) {
    let (app, _dir) = test_app(pool).await;

    let response = app
        .oneshot(get_admin("/api/products/export-csv?template=true"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.trim_end().lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "code;name;description;specifications;image;featured;categoryId"
    );
    assert!(lines[1].starts_with("EL-1001;"));
}
