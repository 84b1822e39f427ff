//! Category types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted catalog category.
///
/// `position` drives the public navigation order; ties are broken by name.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
