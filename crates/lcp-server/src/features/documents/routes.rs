//! Document API routes
//!
//! # Route Structure
//!
//! - `GET /api/documents` - List document metadata (public)
//! - `GET /api/documents/:slug/file` - Download the PDF (public)
//! - `POST /api/documents` - Upload a PDF datasheet (admin, multipart)
//! - `DELETE /api/documents/:slug` - Delete a document (admin)
//!
//! The upload form carries a required `file` part plus text parts `title`,
//! optional `slug` (derived from the title when absent), and optional
//! `product_id`.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use crate::api::response::{ApiResponse, AppError, ErrorResponse};
use crate::auth::extract::AdminIdentity;
use crate::features::FeatureState;

use super::commands::delete::DeleteDocumentError;
use super::commands::upload::{UploadDocumentCommand, UploadDocumentError};
use super::queries::download::DownloadDocumentError;
use super::queries::list::ListDocumentsQuery;

/// Creates the documents router
pub fn document_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_documents))
        .route("/", post(upload_document))
        .route("/:slug/file", get(download_document))
        .route("/:slug", delete(delete_document))
}

#[tracing::instrument(skip(state, multipart), fields(admin = %admin.username))]
async fn upload_document(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    mut multipart: Multipart,
) -> Result<Response, DocumentApiError> {
    let mut bytes: Option<Vec<u8>> = None;
    let mut filename = String::new();
    let mut content_type = String::new();
    let mut title: Option<String> = None;
    let mut slug: Option<String> = None;
    let mut product_id: Option<i64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| DocumentApiError::BadUpload("Malformed multipart body"))?
    {
        match field.name() {
            Some("file") => {
                filename = field.file_name().unwrap_or("document.pdf").to_string();
                content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| DocumentApiError::BadUpload("Could not read file"))?;
                bytes = Some(data.to_vec());
            },
            Some("title") => {
                title = field.text().await.ok();
            },
            Some("slug") => {
                slug = field.text().await.ok().filter(|s| !s.trim().is_empty());
            },
            Some("product_id") => {
                product_id = field.text().await.ok().and_then(|s| s.trim().parse().ok());
            },
            _ => {},
        }
    }

    let bytes = bytes.ok_or(DocumentApiError::BadUpload("No file provided"))?;
    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or(DocumentApiError::BadUpload("No title provided"))?;
    let slug = slug.unwrap_or_else(|| lcp_common::slugify(&title));

    let command = UploadDocumentCommand {
        slug,
        title,
        filename,
        content_type,
        bytes,
        product_id,
    };

    let document =
        super::commands::upload::handle(state.db, state.documents.clone(), command).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(document))).into_response())
}

#[tracing::instrument(skip(state), fields(admin = %admin.username, slug = %slug))]
async fn delete_document(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    Path(slug): Path<String>,
) -> Result<Response, DocumentApiError> {
    super::commands::delete::handle(state.db, state.documents.clone(), &slug).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(json!({ "deleted": slug }))),
    )
        .into_response())
}

#[tracing::instrument(skip(state))]
async fn list_documents(
    State(state): State<FeatureState>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Response, AppError> {
    let documents = super::queries::list::handle(state.db, query).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(documents))).into_response())
}

#[tracing::instrument(skip(state), fields(slug = %slug))]
async fn download_document(
    State(state): State<FeatureState>,
    Path(slug): Path<String>,
) -> Result<Response, DocumentApiError> {
    let download =
        super::queries::download::handle(state.db, state.documents.clone(), &slug).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, download.document.content_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download.document.filename),
            ),
        ],
        download.bytes,
    )
        .into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for document API endpoints
#[derive(Debug)]
enum DocumentApiError {
    BadUpload(&'static str),
    Upload(UploadDocumentError),
    Delete(DeleteDocumentError),
    Download(DownloadDocumentError),
}

impl From<UploadDocumentError> for DocumentApiError {
    fn from(err: UploadDocumentError) -> Self {
        Self::Upload(err)
    }
}

impl From<DeleteDocumentError> for DocumentApiError {
    fn from(err: DeleteDocumentError) -> Self {
        Self::Delete(err)
    }
}

impl From<DownloadDocumentError> for DocumentApiError {
    fn from(err: DownloadDocumentError) -> Self {
        Self::Download(err)
    }
}

impl IntoResponse for DocumentApiError {
    fn into_response(self) -> Response {
        use DocumentApiError::*;

        let (status, code, message) = match &self {
            BadUpload(message) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.to_string()),

            Upload(UploadDocumentError::InvalidSlug(e)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            },
            Upload(UploadDocumentError::TitleRequired) | Upload(UploadDocumentError::NotPdf) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.to_string())
            },
            Upload(UploadDocumentError::UnknownProduct(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.to_string())
            },
            Upload(UploadDocumentError::DuplicateSlug(_)) => {
                (StatusCode::CONFLICT, "CONFLICT", self.to_string())
            },
            Upload(UploadDocumentError::Storage(e)) => storage_error(e),
            Upload(UploadDocumentError::Database(e)) => database(e),

            Delete(DeleteDocumentError::NotFound) | Download(DownloadDocumentError::NotFound) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", "Document not found".to_string())
            },
            Delete(DeleteDocumentError::Storage(e)) => storage_error(e),
            Delete(DeleteDocumentError::Database(e)) | Download(DownloadDocumentError::Database(e)) => {
                database(e)
            },

            Download(DownloadDocumentError::FileMissing(slug)) => {
                tracing::error!("Stored file missing for document '{slug}'");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Document file is unavailable".to_string(),
                )
            },
            Download(DownloadDocumentError::Storage(e)) => storage_error(e),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

fn storage_error(e: &crate::storage::StorageError) -> (StatusCode, &'static str, String) {
    tracing::error!("Storage error in document API: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "A storage error occurred".to_string(),
    )
}

fn database(e: &sqlx::Error) -> (StatusCode, &'static str, String) {
    tracing::error!("Database error in document API: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "A database error occurred".to_string(),
    )
}

impl std::fmt::Display for DocumentApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadUpload(message) => write!(f, "{message}"),
            Self::Upload(e) => write!(f, "{e}"),
            Self::Delete(e) => write!(f, "{e}"),
            Self::Download(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_structure() {
        let router = document_routes();
        assert!(format!("{router:?}").contains("Router"));
    }

    #[test]
    fn test_not_pdf_maps_to_400() {
        let err: DocumentApiError = UploadDocumentError::NotPdf.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
