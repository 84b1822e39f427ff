//! Login command
//!
//! Verifies the credentials against the `admin_users` table and issues an
//! opaque session token. Unknown usernames and wrong passwords produce the
//! same error so the endpoint cannot be used to enumerate accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::{self, Session, SessionHandle};

/// Command to log in as an admin
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// Response from a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Errors that can occur during login
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: i64,
    username: String,
    password_hash: String,
}

/// Handler function for admin login
#[tracing::instrument(skip(pool, sessions, command), fields(username = %command.username))]
pub async fn handle(
    pool: SqlitePool,
    sessions: SessionHandle,
    ttl_secs: u64,
    command: LoginCommand,
) -> Result<LoginResponse, LoginError> {
    let row = sqlx::query_as::<_, AdminRow>(
        "SELECT id, username, password_hash FROM admin_users WHERE username = ?1",
    )
    .bind(command.username.trim())
    .fetch_optional(&pool)
    .await?;

    let Some(row) = row else {
        // Burn time comparably to a real verification.
        let _ = auth::verify_password(&command.password, "");
        return Err(LoginError::InvalidCredentials);
    };

    if !auth::verify_password(&command.password, &row.password_hash) {
        tracing::info!(username = %row.username, "Failed login attempt");
        return Err(LoginError::InvalidCredentials);
    }

    let token = auth::generate_token();
    let expires_at = auth::session_expiry(ttl_secs);

    sessions
        .insert(Session {
            token: token.clone(),
            user_id: row.id,
            username: row.username.clone(),
            expires_at,
        })
        .await;

    tracing::info!(username = %row.username, "Admin logged in");

    Ok(LoginResponse { token, expires_at })
}
