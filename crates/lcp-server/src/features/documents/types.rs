//! Document types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a stored PDF datasheet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: i64,
    pub slug: String,
    pub title: String,
    /// Original filename as uploaded, kept for the download disposition.
    pub filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    /// Hex sha256 of the stored bytes.
    pub checksum: String,
    /// Weak reference to the product this datasheet belongs to.
    pub product_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
