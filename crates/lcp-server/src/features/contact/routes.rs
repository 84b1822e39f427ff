//! Contact API routes
//!
//! # Route Structure
//!
//! - `POST /api/contact` - Submit a contact message (public)
//! - `GET /api/contact-messages` - Admin inbox, paginated (admin)

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::api::response::{ApiResponse, AppError, ErrorResponse};
use crate::auth::extract::AdminIdentity;
use crate::features::FeatureState;

use super::commands::submit::{SubmitContactCommand, SubmitContactError};
use super::queries::list::ListContactMessagesQuery;

/// Creates the contact router (merged at the API root)
pub fn contact_routes() -> Router<FeatureState> {
    Router::new()
        .route("/contact", post(submit_contact))
        .route("/contact-messages", get(list_contact_messages))
}

#[tracing::instrument(skip(state, command))]
async fn submit_contact(
    State(state): State<FeatureState>,
    Json(command): Json<SubmitContactCommand>,
) -> Result<Response, ContactApiError> {
    let id = super::commands::submit::handle(state.db, command).await?;

    // Spam and ham get the same response.
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(json!({ "id": id }))),
    )
        .into_response())
}

#[tracing::instrument(skip(state, query), fields(admin = %admin.username))]
async fn list_contact_messages(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    Query(query): Query<ListContactMessagesQuery>,
) -> Result<Response, AppError> {
    let result = super::queries::list::handle(state.db, query).await?;

    let meta = json!({ "pagination": result.pagination });
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(result.items, meta)),
    )
        .into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
struct ContactApiError(SubmitContactError);

impl From<SubmitContactError> for ContactApiError {
    fn from(err: SubmitContactError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ContactApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            SubmitContactError::InvalidField(e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            },
            SubmitContactError::InvalidEmail(e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            },
            SubmitContactError::Database(e) => {
                tracing::error!("Database error in contact API: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "A database error occurred".to_string(),
                )
            },
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
