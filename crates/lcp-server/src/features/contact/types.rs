//! Contact message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    /// Set when the honeypot field was filled in.
    pub is_spam: bool,
    pub created_at: DateTime<Utc>,
}
