//! Create category command

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::features::categories::types::Category;
use crate::features::shared::error_helpers::map_unique_violation;
use crate::features::shared::validation::{
    validate_slug, validate_text, NameValidationError, SlugValidationError,
};

const MAX_SLUG_LENGTH: usize = 100;
const MAX_NAME_LENGTH: usize = 256;

/// Command to create a new category
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryCommand {
    pub name: String,
    /// Derived from `name` when absent.
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub position: i64,
}

/// Errors that can occur when creating a category
#[derive(Debug, thiserror::Error)]
pub enum CreateCategoryError {
    #[error(transparent)]
    InvalidSlug(#[from] SlugValidationError),

    #[error(transparent)]
    InvalidField(#[from] NameValidationError),

    #[error("A category with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CreateCategoryCommand {
    fn validate(&self) -> Result<String, CreateCategoryError> {
        validate_text(&self.name, "name", MAX_NAME_LENGTH)?;

        let slug = match &self.slug {
            Some(slug) => slug.trim().to_string(),
            None => lcp_common::slugify(&self.name),
        };
        validate_slug(&slug, MAX_SLUG_LENGTH)?;

        Ok(slug)
    }
}

/// Handler function to create a new category
#[tracing::instrument(skip(pool, command), fields(name = %command.name))]
pub async fn handle(
    pool: SqlitePool,
    command: CreateCategoryCommand,
) -> Result<Category, CreateCategoryError> {
    let slug = command.validate()?;

    let category = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (slug, name, description, position)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, slug, name, description, position, created_at, updated_at
        "#,
    )
    .bind(&slug)
    .bind(command.name.trim())
    .bind(&command.description)
    .bind(command.position)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        map_unique_violation(e, CreateCategoryError::DuplicateSlug(slug.clone()), |e| {
            CreateCategoryError::Database(e)
        })
    })?;

    tracing::info!(category_id = category.id, slug = %category.slug, "Category created");

    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str) -> CreateCategoryCommand {
        CreateCategoryCommand {
            name: name.to_string(),
            slug: None,
            description: None,
            position: 0,
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_create_category_derives_slug(pool: SqlitePool) {
        let category = handle(pool, command("Traction Sheaves")).await.unwrap();
        assert_eq!(category.slug, "traction-sheaves");
        assert_eq!(category.position, 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_create_duplicate_slug(pool: SqlitePool) {
        handle(pool.clone(), command("Sheaves")).await.unwrap();
        let result = handle(pool, command("Sheaves")).await;

        assert!(matches!(
            result,
            Err(CreateCategoryError::DuplicateSlug(slug)) if slug == "sheaves"
        ));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_create_rejects_empty_name(pool: SqlitePool) {
        let result = handle(pool, command("   ")).await;
        assert!(matches!(result, Err(CreateCategoryError::InvalidField(_))));
    }
}
