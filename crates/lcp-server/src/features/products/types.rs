//! Product types shared across commands, queries, and the import pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted catalog product.
///
/// Invariant: `code`, `name`, and `slug` are non-empty; `slug` is globally
/// unique. `category_id` is a weak reference (a product may be
/// uncategorized).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub specifications: Option<String>,
    pub image: Option<String>,
    pub featured: bool,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An unvalidated product row awaiting promotion to a persisted [`Product`].
///
/// Produced by the CSV parser or received as a JSON batch; consumed by the
/// bulk import executor; never persisted as-is. Fields default rather than
/// fail on deserialization so that incomplete records can be rejected per
/// row with a reason instead of failing the whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProduct {
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub name: String,

    /// Derived from `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default)]
    pub featured: bool,

    /// Weak reference to a category; validated against existing categories
    /// by the executor.
    #[serde(default, alias = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}
