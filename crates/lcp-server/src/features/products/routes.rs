//! Product API routes
//!
//! # Route Structure
//!
//! - `GET /api/products` - List products (public, filters + pagination)
//! - `GET /api/products/:slug` - Get a single product (public)
//! - `POST /api/products` - Create a product (admin)
//! - `PUT /api/products/:slug` - Update a product (admin)
//! - `DELETE /api/products/:slug` - Delete a product (admin)
//! - `POST /api/products/bulk-import` - Import a JSON batch (admin)
//! - `POST /api/products/import-csv` - Import an uploaded CSV file (admin)
//! - `GET /api/products/export-csv` - Export the catalog as CSV (admin)
//!
//! # Bulk import wire contract
//!
//! The bulk-import family does not use the standard envelope: its JSON shape
//! is a fixed contract with the admin UI.
//!
//! - `201` `{"message": "<N> products imported successfully", "products": [..], "skipped": [..]}`
//! - `400` `{"message": "<reason>"}`
//! - `500` `{"message": "Failed to import products"}`

use axum::{
    extract::{Multipart, Path, Query, State},
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::response::{ApiResponse, ErrorResponse};
use crate::auth::extract::AdminIdentity;
use crate::features::FeatureState;

use super::commands::bulk_import::{BulkImportCommand, BulkImportError, ImportOutcome};
use super::commands::create::{CreateProductCommand, CreateProductError};
use super::commands::delete::DeleteProductError;
use super::commands::update::{UpdateProductCommand, UpdateProductError};
use super::import::{self, ParsedImport};
use super::queries::export_csv::ExportCsvError;
use super::queries::get::GetProductError;
use super::queries::list::ListProductsQuery;
use super::types::CandidateProduct;

/// Creates the products router
pub fn product_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_products))
        .route("/", post(create_product))
        .route("/bulk-import", post(bulk_import))
        .route("/import-csv", post(import_csv))
        .route("/export-csv", get(export_csv))
        .route("/:slug", get(get_product))
        .route("/:slug", put(update_product))
        .route("/:slug", delete(delete_product))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

#[tracing::instrument(skip(state, command), fields(admin = %admin.username, code = %command.code))]
async fn create_product(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    Json(command): Json<CreateProductCommand>,
) -> Result<Response, ProductApiError> {
    let response = super::commands::create::handle(state.db, command).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))).into_response())
}

#[tracing::instrument(skip(state, command), fields(admin = %admin.username, slug = %slug))]
async fn update_product(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    Path(slug): Path<String>,
    Json(mut command): Json<UpdateProductCommand>,
) -> Result<Response, ProductApiError> {
    command.slug = slug;

    let product = super::commands::update::handle(state.db, command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(product))).into_response())
}

#[tracing::instrument(skip(state), fields(admin = %admin.username, slug = %slug))]
async fn delete_product(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    Path(slug): Path<String>,
) -> Result<Response, ProductApiError> {
    super::commands::delete::handle(state.db, &slug).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(json!({ "deleted": slug }))),
    )
        .into_response())
}

// ============================================================================
// Bulk Import (fixed wire contract)
// ============================================================================

/// Request body for the JSON bulk import endpoint.
#[derive(Debug, Deserialize)]
struct BulkImportRequest {
    products: Vec<CandidateProduct>,
}

/// Import a JSON batch of products.
///
/// The body must be `{"products": [...]}` with a non-empty array; records
/// are validated per row, so an array of partially-bad records still gets a
/// `201` with the failures listed under `skipped`.
#[tracing::instrument(skip(state, body), fields(admin = %admin.username))]
async fn bulk_import(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    body: Result<Json<BulkImportRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return import_bad_request(format!("Invalid request body: {rejection}"));
        },
    };

    if request.products.is_empty() {
        return import_bad_request("No products provided");
    }

    let command = BulkImportCommand::from_records(request.products);
    run_import(state, command).await
}

/// Import an uploaded CSV file (multipart field `file`).
#[tracing::instrument(skip(state, multipart), fields(admin = %admin.username))]
async fn import_csv(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    mut multipart: Multipart,
) -> Response {
    let mut content: Option<String> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("file") {
                    match field.text().await {
                        Ok(text) => content = Some(text),
                        Err(_) => return import_bad_request("File is not valid UTF-8 text"),
                    }
                }
            },
            Ok(None) => break,
            Err(_) => return import_bad_request("Malformed multipart body"),
        }
    }

    let Some(content) = content else {
        return import_bad_request("No file provided");
    };

    let ParsedImport { candidates, skipped } = import::parse_csv(&content);

    if candidates.is_empty() && skipped.is_empty() {
        return import_bad_request("CSV file contains no product rows");
    }

    let command = BulkImportCommand { records: candidates };

    // Parser skips come first, then the executor's own.
    run_import_with_skips(state, command, skipped).await
}

async fn run_import(state: FeatureState, command: BulkImportCommand) -> Response {
    run_import_with_skips(state, command, Vec::new()).await
}

async fn run_import_with_skips(
    state: FeatureState,
    command: BulkImportCommand,
    mut prior_skips: Vec<import::SkippedRow>,
) -> Response {
    match super::commands::bulk_import::handle(state.db, command).await {
        Ok(ImportOutcome {
            products,
            mut skipped,
            ..
        }) => {
            prior_skips.append(&mut skipped);
            let body = json!({
                "message": format!("{} products imported successfully", products.len()),
                "products": products,
                "skipped": prior_skips,
            });
            (StatusCode::CREATED, Json(body)).into_response()
        },
        Err(BulkImportError::Database(e)) => {
            tracing::error!("Database error during bulk import: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Failed to import products" })),
            )
                .into_response()
        },
    }
}

fn import_bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": message.into() })),
    )
        .into_response()
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(state, query))]
async fn list_products(
    State(state): State<FeatureState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Response, ProductApiError> {
    let response = super::queries::list::handle(state.db, query).await?;

    let meta = json!({ "pagination": response.pagination });
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(response.items, meta)),
    )
        .into_response())
}

#[tracing::instrument(skip(state), fields(slug = %slug))]
async fn get_product(
    State(state): State<FeatureState>,
    Path(slug): Path<String>,
) -> Result<Response, ProductApiError> {
    let product = super::queries::get::handle(state.db, &slug).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(product))).into_response())
}

/// Query parameters for the CSV export endpoint.
#[derive(Debug, Default, Deserialize)]
struct ExportParams {
    /// When true, an import template is returned: the header row plus one
    /// sample row.
    #[serde(default)]
    template: bool,
}

#[tracing::instrument(skip(state), fields(admin = %admin.username, template = params.template))]
async fn export_csv(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    Query(params): Query<ExportParams>,
) -> Result<Response, ProductApiError> {
    let csv = super::queries::export_csv::handle(state.db, params.template).await?;

    let filename = if params.template {
        "products-template.csv"
    } else {
        "products.csv"
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for product API endpoints
#[derive(Debug)]
enum ProductApiError {
    Create(CreateProductError),
    Update(UpdateProductError),
    Delete(DeleteProductError),
    Get(GetProductError),
    Export(ExportCsvError),
    List(sqlx::Error),
}

impl From<CreateProductError> for ProductApiError {
    fn from(err: CreateProductError) -> Self {
        Self::Create(err)
    }
}

impl From<UpdateProductError> for ProductApiError {
    fn from(err: UpdateProductError) -> Self {
        Self::Update(err)
    }
}

impl From<DeleteProductError> for ProductApiError {
    fn from(err: DeleteProductError) -> Self {
        Self::Delete(err)
    }
}

impl From<GetProductError> for ProductApiError {
    fn from(err: GetProductError) -> Self {
        Self::Get(err)
    }
}

impl From<ExportCsvError> for ProductApiError {
    fn from(err: ExportCsvError) -> Self {
        Self::Export(err)
    }
}

impl From<sqlx::Error> for ProductApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::List(err)
    }
}

impl IntoResponse for ProductApiError {
    fn into_response(self) -> Response {
        use ProductApiError::*;

        let (status, code, message) = match &self {
            Create(CreateProductError::InvalidSlug(e)) => validation(e),
            Create(CreateProductError::InvalidField(e)) => validation(e),
            Create(CreateProductError::DuplicateSlug(_)) => {
                (StatusCode::CONFLICT, "CONFLICT", self.to_string())
            },
            Create(CreateProductError::UnknownCategory(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.to_string())
            },
            Create(CreateProductError::Database(e)) => database(e),

            Update(UpdateProductError::InvalidSlug(e)) => validation(e),
            Update(UpdateProductError::InvalidField(e)) => validation(e),
            Update(UpdateProductError::NotFound) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            },
            Update(UpdateProductError::DuplicateSlug(_)) => {
                (StatusCode::CONFLICT, "CONFLICT", self.to_string())
            },
            Update(UpdateProductError::UnknownCategory(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.to_string())
            },
            Update(UpdateProductError::Database(e)) => database(e),

            Delete(DeleteProductError::NotFound) | Get(GetProductError::NotFound) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            },
            Delete(DeleteProductError::Database(e)) | Get(GetProductError::Database(e)) => {
                database(e)
            },

            Export(ExportCsvError::Database(e)) => database(e),
            Export(ExportCsvError::Csv(e)) => {
                tracing::error!("CSV serialization error during export: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Failed to export products".to_string(),
                )
            },

            List(e) => database(e),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

fn validation(e: &impl std::fmt::Display) -> (StatusCode, &'static str, String) {
    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
}

fn database(e: &sqlx::Error) -> (StatusCode, &'static str, String) {
    tracing::error!("Database error in product API: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "A database error occurred".to_string(),
    )
}

impl std::fmt::Display for ProductApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create(e) => write!(f, "{e}"),
            Self::Update(e) => write!(f, "{e}"),
            Self::Delete(e) => write!(f, "{e}"),
            Self::Get(e) => write!(f, "{e}"),
            Self::Export(e) => write!(f, "{e}"),
            Self::List(e) => write!(f, "{e}"),
        }
    }
}
