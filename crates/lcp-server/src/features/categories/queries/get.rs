//! Get category query

use sqlx::SqlitePool;

use crate::features::categories::types::Category;

/// Errors that can occur when fetching a category
#[derive(Debug, thiserror::Error)]
pub enum GetCategoryError {
    #[error("Category not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function to fetch a single category by slug
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, slug: &str) -> Result<Category, GetCategoryError> {
    sqlx::query_as::<_, Category>(
        "SELECT id, slug, name, description, position, created_at, updated_at \
         FROM categories WHERE slug = ?1",
    )
    .bind(slug)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetCategoryError::NotFound)
}
