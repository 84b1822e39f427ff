//! Quote API routes
//!
//! # Route Structure
//!
//! - `POST /api/quotes` - Submit a quote request (public)
//! - `GET /api/quote-requests` - List quote requests, paginated (admin)

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

use super::commands::submit::{SubmitQuoteCommand, SubmitQuoteError};
use super::queries::list::ListQuotesQuery;

/// Creates the quotes router (merged at the API root)
pub fn quote_routes() -> Router<FeatureState> {
    Router::new()
        .route("/quotes", post(submit_quote))
        .route("/quote-requests", get(list_quote_requests))
}

#[tracing::instrument(skip(state, command))]
async fn submit_quote(
    State(state): State<FeatureState>,
    Json(command): Json<SubmitQuoteCommand>,
) -> Result<Response, QuoteApiError> {
    let response = super::commands::submit::handle(state.db, command).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))).into_response())
}

#[tracing::instrument(skip(state, query), fields(admin = %admin.username))]
async fn list_quote_requests(
    State(state): State<FeatureState>,
    admin: AdminIdentity,
    Query(query): Query<ListQuotesQuery>,
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
struct QuoteApiError(SubmitQuoteError);

impl From<SubmitQuoteError> for QuoteApiError {
    fn from(err: SubmitQuoteError) -> Self {
        Self(err)
    }
}

impl IntoResponse for QuoteApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            SubmitQuoteError::InvalidField(e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            },
            SubmitQuoteError::InvalidEmail(e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            },
            SubmitQuoteError::EmptySelections => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.0.to_string())
            },
            SubmitQuoteError::Selections(e) => {
                tracing::error!("Selections serialization error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            },
            SubmitQuoteError::Database(e) => {
                tracing::error!("Database error in quote API: {e}");
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
