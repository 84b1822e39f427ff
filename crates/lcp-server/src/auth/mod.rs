//! Admin authentication
//!
//! Opaque bearer tokens looked up in a server-side session store. Passwords
//! are argon2 hashes in the `admin_users` table; a bootstrap admin account is
//! ensured at startup from configuration.
//!
//! Sessions are deliberately not persisted: one server instance, sessions
//! lost on restart. [`SessionStore`] is the seam a multi-instance deployment
//! would use to externalize them to a shared store.

pub mod extract;

use argon2::password_hash::{rand_core::OsRng as HashOsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::AuthConfig;

/// Number of random bytes in a session token (before base64 encoding).
const TOKEN_BYTES: usize = 32;

/// An authenticated admin session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Pluggable session backend.
///
/// The in-memory implementation is the default; anything shared across
/// instances (a key-value store, the database) plugs in here.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session under its token.
    async fn insert(&self, session: Session);

    /// Look up an unexpired session. Expired entries are treated as absent.
    async fn get(&self, token: &str) -> Option<Session>;

    /// Revoke a session. Returns whether the token was present.
    async fn revoke(&self, token: &str) -> bool;
}

/// Shared handle to the configured session backend.
pub type SessionHandle = Arc<dyn SessionStore>;

/// Process-local session store backed by a `RwLock<HashMap>`.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token.clone(), session);
    }

    async fn get(&self, token: &str) -> Option<Session> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if !session.is_expired() => return Some(session.clone()),
                Some(_) => {},
                None => return None,
            }
        }

        // Expired entry: drop it so the map does not grow unbounded.
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        None
    }

    async fn revoke(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token).is_some()
    }
}

/// Errors from password hashing and verification
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Generate an opaque session token (256 bits, URL-safe base64).
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Compute the expiry timestamp for a session issued now.
pub fn session_expiry(ttl_secs: u64) -> DateTime<Utc> {
    Utc::now() + Duration::seconds(ttl_secs as i64)
}

/// Hash a password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut HashOsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Ensure the bootstrap admin account from configuration exists.
///
/// Only creates the account when the username is absent; an existing
/// account (and its possibly rotated password) is left untouched.
pub async fn ensure_bootstrap_admin(pool: &SqlitePool, config: &AuthConfig) -> anyhow::Result<()> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM admin_users WHERE username = ?1")
            .bind(&config.admin_username)
            .fetch_optional(pool)
            .await?;

    if existing.is_some() {
        tracing::debug!(username = %config.admin_username, "Bootstrap admin already present");
        return Ok(());
    }

    if config.admin_password.is_empty() {
        anyhow::bail!(
            "Admin account '{}' does not exist and LCP_ADMIN_PASSWORD is not set",
            config.admin_username
        );
    }

    let password_hash = hash_password(&config.admin_password)?;
    sqlx::query("INSERT INTO admin_users (username, password_hash) VALUES (?1, ?2)")
        .bind(&config.admin_username)
        .bind(&password_hash)
        .execute(pool)
        .await?;

    tracing::info!(username = %config.admin_username, "Bootstrap admin account created");
    Ok(())
}
