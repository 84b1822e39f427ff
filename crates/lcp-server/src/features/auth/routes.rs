//! Auth API routes
//!
//! # Route Structure
//!
//! - `POST /api/auth/login` - Exchange credentials for a bearer token (public)
//! - `POST /api/auth/logout` - Revoke the presented token (admin)
//! - `GET /api/auth/me` - Introspect the current session (admin)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::api::response::{ApiResponse, ErrorResponse};
use crate::auth::extract::AdminIdentity;
use crate::features::FeatureState;

use super::commands::login::{LoginCommand, LoginError};

/// Creates the auth router
pub fn auth_routes() -> Router<FeatureState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

#[tracing::instrument(skip(state, command), fields(username = %command.username))]
async fn login(
    State(state): State<FeatureState>,
    Json(command): Json<LoginCommand>,
) -> Result<Response, AuthApiError> {
    let response = super::commands::login::handle(
        state.db,
        state.sessions.clone(),
        state.session_ttl_secs,
        command,
    )
    .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[tracing::instrument(skip(state), fields(admin = %admin.username))]
async fn logout(State(state): State<FeatureState>, admin: AdminIdentity) -> Response {
    state.sessions.revoke(&admin.token).await;

    (
        StatusCode::OK,
        Json(ApiResponse::success(json!({ "logged_out": true }))),
    )
        .into_response()
}

#[tracing::instrument(skip(admin), fields(admin = %admin.username))]
async fn me(admin: AdminIdentity) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::success(json!({
            "user_id": admin.user_id,
            "username": admin.username,
        }))),
    )
        .into_response()
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
struct AuthApiError(LoginError);

impl From<LoginError> for AuthApiError {
    fn from(err: LoginError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            LoginError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.0.to_string(),
            ),
            LoginError::Database(e) => {
                tracing::error!("Database error during login: {e}");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_structure() {
        let router = auth_routes();
        assert!(format!("{router:?}").contains("Router"));
    }

    #[test]
    fn test_invalid_credentials_map_to_401() {
        let err: AuthApiError = LoginError::InvalidCredentials.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
