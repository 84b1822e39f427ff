//! Update category command

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::features::categories::types::Category;
use crate::features::shared::error_helpers::map_unique_violation;
use crate::features::shared::validation::{
    validate_slug, validate_text, NameValidationError, SlugValidationError,
};

const MAX_SLUG_LENGTH: usize = 100;
const MAX_NAME_LENGTH: usize = 256;

/// Command to update a category, addressed by its current slug.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryCommand {
    #[serde(skip)]
    pub slug: String,

    pub name: Option<String>,
    pub new_slug: Option<String>,
    pub description: Option<String>,
    pub position: Option<i64>,
}

/// Errors that can occur when updating a category
#[derive(Debug, thiserror::Error)]
pub enum UpdateCategoryError {
    #[error("Category not found")]
    NotFound,

    #[error(transparent)]
    InvalidSlug(#[from] SlugValidationError),

    #[error(transparent)]
    InvalidField(#[from] NameValidationError),

    #[error("A category with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function to update a category
#[tracing::instrument(skip(pool, command), fields(slug = %command.slug))]
pub async fn handle(
    pool: SqlitePool,
    command: UpdateCategoryCommand,
) -> Result<Category, UpdateCategoryError> {
    if let Some(name) = &command.name {
        validate_text(name, "name", MAX_NAME_LENGTH)?;
    }
    if let Some(new_slug) = &command.new_slug {
        validate_slug(new_slug.trim(), MAX_SLUG_LENGTH)?;
    }

    let current = sqlx::query_as::<_, Category>(
        "SELECT id, slug, name, description, position, created_at, updated_at \
         FROM categories WHERE slug = ?1",
    )
    .bind(&command.slug)
    .fetch_optional(&pool)
    .await?
    .ok_or(UpdateCategoryError::NotFound)?;

    let slug = command
        .new_slug
        .as_deref()
        .map(str::trim)
        .map(str::to_string)
        .unwrap_or(current.slug);

    let category = sqlx::query_as::<_, Category>(
        r#"
        UPDATE categories
        SET slug = ?1, name = ?2, description = ?3, position = ?4, updated_at = datetime('now')
        WHERE id = ?5
        RETURNING id, slug, name, description, position, created_at, updated_at
        "#,
    )
    .bind(&slug)
    .bind(command.name.as_deref().map(str::trim).unwrap_or(&current.name))
    .bind(command.description.as_deref().or(current.description.as_deref()))
    .bind(command.position.unwrap_or(current.position))
    .bind(current.id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        map_unique_violation(e, UpdateCategoryError::DuplicateSlug(slug.clone()), |e| {
            UpdateCategoryError::Database(e)
        })
    })?;

    tracing::info!(category_id = category.id, "Category updated");

    Ok(category)
}
