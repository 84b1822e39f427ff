//! Admin identity extractor
//!
//! Handlers that take [`AdminIdentity`] as an argument are admin-only: the
//! extractor resolves the `Authorization: Bearer <token>` header against the
//! session store and rejects missing, unknown, or expired tokens with 401
//! before the handler body runs.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::api::response::AppError;
use crate::features::FeatureState;

/// The authenticated admin behind a request.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub user_id: i64,
    pub username: String,
    /// The presented token, kept so logout can revoke it.
    pub token: String,
}

#[async_trait]
impl FromRequestParts<FeatureState> for AdminIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &FeatureState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?
            .trim();

        let session = state
            .sessions
            .get(token)
            .await
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AdminIdentity {
            user_id: session.user_id,
            username: session.username,
            token: session.token,
        })
    }
}
