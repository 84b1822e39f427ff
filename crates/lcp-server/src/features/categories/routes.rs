//! Category API routes
//!
//! # Route Structure
//!
//! - `GET /api/categories` - List all categories (public)
//! - `GET /api/categories/:slug` - Get a single category (public)
//! - `POST /api/categories` - Create a category (admin)
//! - `PUT /api/categories/:slug` - Update a category (admin)
//! - `DELETE /api/categories/:slug` - Delete a category, detaching its
//!   products (admin)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::api::response::{ApiResponse, ErrorResponse};
use crate::auth::extract::AdminIdentity;
use crate::features::FeatureState;

use super::commands::create::{CreateCategoryCommand, CreateCategoryError};
use super::commands::delete::DeleteCategoryError;
use super::commands::update::{UpdateCategoryCommand, UpdateCategoryError};
use super::queries::get::GetCategoryError;

/// Creates the categories router
pub fn category_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/", post(create_category))
        .route("/:slug", get(get_category))
        .route("/:slug", put(update_category))
        .route("/:slug", delete(delete_category))
}

#[tracing::instrument(skip(state, command), fields(admin = %admin.username, name = %command.name))]
async fn create_category(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    Json(command): Json<CreateCategoryCommand>,
) -> Result<Response, CategoryApiError> {
    let category = super::commands::create::handle(state.db, command).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(category))).into_response())
}

#[tracing::instrument(skip(state, command), fields(admin = %admin.username, slug = %slug))]
async fn update_category(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    Path(slug): Path<String>,
    Json(mut command): Json<UpdateCategoryCommand>,
) -> Result<Response, CategoryApiError> {
    command.slug = slug;

    let category = super::commands::update::handle(state.db, command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(category))).into_response())
}

#[tracing::instrument(skip(state), fields(admin = %admin.username, slug = %slug))]
async fn delete_category(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    Path(slug): Path<String>,
) -> Result<Response, CategoryApiError> {
    let response = super::commands::delete::handle(state.db, &slug).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(json!({
            "deleted": slug,
            "detached_products": response.detached_products,
        }))),
    )
        .into_response())
}

#[tracing::instrument(skip(state))]
async fn list_categories(State(state): State<FeatureState>) -> Result<Response, CategoryApiError> {
    let categories = super::queries::list::handle(state.db).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(categories))).into_response())
}

#[tracing::instrument(skip(state), fields(slug = %slug))]
async fn get_category(
    State(state): State<FeatureState>,
    Path(slug): Path<String>,
) -> Result<Response, CategoryApiError> {
    let category = super::queries::get::handle(state.db, &slug).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(category))).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for category API endpoints
#[derive(Debug)]
enum CategoryApiError {
    Create(CreateCategoryError),
    Update(UpdateCategoryError),
    Delete(DeleteCategoryError),
    Get(GetCategoryError),
    List(sqlx::Error),
}

impl From<CreateCategoryError> for CategoryApiError {
    fn from(err: CreateCategoryError) -> Self {
        Self::Create(err)
    }
}

impl From<UpdateCategoryError> for CategoryApiError {
    fn from(err: UpdateCategoryError) -> Self {
        Self::Update(err)
    }
}

impl From<DeleteCategoryError> for CategoryApiError {
    fn from(err: DeleteCategoryError) -> Self {
        Self::Delete(err)
    }
}

impl From<GetCategoryError> for CategoryApiError {
    fn from(err: GetCategoryError) -> Self {
        Self::Get(err)
    }
}

impl From<sqlx::Error> for CategoryApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::List(err)
    }
}

impl IntoResponse for CategoryApiError {
    fn into_response(self) -> Response {
        use CategoryApiError::*;

        let (status, code, message) = match &self {
            Create(CreateCategoryError::InvalidSlug(e)) => validation(e),
            Create(CreateCategoryError::InvalidField(e)) => validation(e),
            Create(CreateCategoryError::DuplicateSlug(_)) => {
                (StatusCode::CONFLICT, "CONFLICT", self.to_string())
            },
            Create(CreateCategoryError::Database(e)) => database(e),

            Update(UpdateCategoryError::InvalidSlug(e)) => validation(e),
            Update(UpdateCategoryError::InvalidField(e)) => validation(e),
            Update(UpdateCategoryError::NotFound) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            },
            Update(UpdateCategoryError::DuplicateSlug(_)) => {
                (StatusCode::CONFLICT, "CONFLICT", self.to_string())
            },
            Update(UpdateCategoryError::Database(e)) => database(e),

            Delete(DeleteCategoryError::NotFound) | Get(GetCategoryError::NotFound) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            },
            Delete(DeleteCategoryError::Database(e)) | Get(GetCategoryError::Database(e)) => {
                database(e)
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
    tracing::error!("Database error in category API: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "A database error occurred".to_string(),
    )
}

impl std::fmt::Display for CategoryApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create(e) => write!(f, "{e}"),
            Self::Update(e) => write!(f, "{e}"),
            Self::Delete(e) => write!(f, "{e}"),
            Self::Get(e) => write!(f, "{e}"),
            Self::List(e) => write!(f, "{e}"),
        }
    }
}
