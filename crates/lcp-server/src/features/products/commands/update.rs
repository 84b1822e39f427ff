//! Update product command

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::features::products::types::Product;
use crate::features::shared::error_helpers::map_unique_violation;
use crate::features::shared::validation::{
    validate_slug, validate_text, NameValidationError, SlugValidationError,
};

const MAX_SLUG_LENGTH: usize = 100;
const MAX_NAME_LENGTH: usize = 256;
const MAX_CODE_LENGTH: usize = 64;

/// Command to update an existing product, addressed by its current slug.
///
/// All fields are optional; absent fields are left unchanged. Clearing an
/// optional text column is not supported: the row keeps its value unless a
/// new one is provided.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductCommand {
    #[serde(skip)]
    pub slug: String,

    pub code: Option<String>,
    pub name: Option<String>,
    pub new_slug: Option<String>,
    pub description: Option<String>,
    pub specifications: Option<String>,
    pub image: Option<String>,
    pub featured: Option<bool>,
    pub category_id: Option<i64>,
}

/// Errors that can occur when updating a product
#[derive(Debug, thiserror::Error)]
pub enum UpdateProductError {
    #[error("Product not found")]
    NotFound,

    #[error(transparent)]
    InvalidSlug(#[from] SlugValidationError),

    #[error(transparent)]
    InvalidField(#[from] NameValidationError),

    #[error("A product with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Category {0} does not exist")]
    UnknownCategory(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UpdateProductCommand {
    fn validate(&self) -> Result<(), UpdateProductError> {
        if let Some(code) = &self.code {
            validate_text(code, "code", MAX_CODE_LENGTH)?;
        }
        if let Some(name) = &self.name {
            validate_text(name, "name", MAX_NAME_LENGTH)?;
        }
        if let Some(new_slug) = &self.new_slug {
            validate_slug(new_slug.trim(), MAX_SLUG_LENGTH)?;
        }
        Ok(())
    }
}

/// Handler function to update a product
#[tracing::instrument(skip(pool, command), fields(slug = %command.slug))]
pub async fn handle(
    pool: SqlitePool,
    command: UpdateProductCommand,
) -> Result<Product, UpdateProductError> {
    command.validate()?;

    let current = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, code, name, slug, description, specifications, image,
               featured, category_id, created_at, updated_at
        FROM products WHERE slug = ?1
        "#,
    )
    .bind(&command.slug)
    .fetch_optional(&pool)
    .await?
    .ok_or(UpdateProductError::NotFound)?;

    if let Some(category_id) = command.category_id {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?1")
            .bind(category_id)
            .fetch_optional(&pool)
            .await?;
        if exists.is_none() {
            return Err(UpdateProductError::UnknownCategory(category_id));
        }
    }

    let slug = command
        .new_slug
        .as_deref()
        .map(str::trim)
        .map(str::to_string)
        .unwrap_or(current.slug);

    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET code = ?1, name = ?2, slug = ?3, description = ?4, specifications = ?5,
            image = ?6, featured = ?7, category_id = ?8, updated_at = datetime('now')
        WHERE id = ?9
        RETURNING id, code, name, slug, description, specifications, image,
                  featured, category_id, created_at, updated_at
        "#,
    )
    .bind(command.code.as_deref().map(str::trim).unwrap_or(&current.code))
    .bind(command.name.as_deref().map(str::trim).unwrap_or(&current.name))
    .bind(&slug)
    .bind(command.description.as_deref().or(current.description.as_deref()))
    .bind(
        command
            .specifications
            .as_deref()
            .or(current.specifications.as_deref()),
    )
    .bind(command.image.as_deref().or(current.image.as_deref()))
    .bind(command.featured.unwrap_or(current.featured))
    .bind(command.category_id.or(current.category_id))
    .bind(current.id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        map_unique_violation(e, UpdateProductError::DuplicateSlug(slug.clone()), |e| {
            UpdateProductError::Database(e)
        })
    })?;

    tracing::info!(product_id = product.id, "Product updated");

    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(pool: &SqlitePool, code: &str, name: &str, slug: &str) {
        sqlx::query("INSERT INTO products (code, name, slug) VALUES (?1, ?2, ?3)")
            .bind(code)
            .bind(name)
            .bind(slug)
            .execute(pool)
            .await
            .unwrap();
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_partial_update_keeps_other_fields(pool: SqlitePool) {
        seed(&pool, "EL-1", "Widget", "widget").await;

        let command = UpdateProductCommand {
            slug: "widget".to_string(),
            featured: Some(true),
            ..UpdateProductCommand::default()
        };

        let product = handle(pool, command).await.unwrap();
        assert_eq!(product.code, "EL-1");
        assert_eq!(product.name, "Widget");
        assert!(product.featured);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_rename_slug(pool: SqlitePool) {
        seed(&pool, "EL-1", "Widget", "widget").await;

        let command = UpdateProductCommand {
            slug: "widget".to_string(),
            new_slug: Some("widget-v2".to_string()),
            ..UpdateProductCommand::default()
        };

        let product = handle(pool, command).await.unwrap();
        assert_eq!(product.slug, "widget-v2");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_update_missing_product(pool: SqlitePool) {
        let command = UpdateProductCommand {
            slug: "nope".to_string(),
            ..UpdateProductCommand::default()
        };

        assert!(matches!(handle(pool, command).await, Err(UpdateProductError::NotFound)));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_rename_to_taken_slug(pool: SqlitePool) {
        seed(&pool, "EL-1", "One", "one").await;
        seed(&pool, "EL-2", "Two", "two").await;

        let command = UpdateProductCommand {
            slug: "one".to_string(),
            new_slug: Some("two".to_string()),
            ..UpdateProductCommand::default()
        };

        assert!(matches!(
            handle(pool, command).await,
            Err(UpdateProductError::DuplicateSlug(slug)) if slug == "two"
        ));
    }
}
