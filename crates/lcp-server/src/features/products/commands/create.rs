//! Create product command

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::features::products::types::Product;
use crate::features::shared::error_helpers::map_unique_violation;
use crate::features::shared::validation::{
    validate_slug, validate_text, NameValidationError, SlugValidationError,
};

const MAX_SLUG_LENGTH: usize = 100;
const MAX_NAME_LENGTH: usize = 256;
const MAX_CODE_LENGTH: usize = 64;

/// Command to create a new product
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductCommand {
    pub code: String,
    pub name: String,
    /// Derived from `name` when absent.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub specifications: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub category_id: Option<i64>,
}

/// Response from creating a product
#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    #[serde(flatten)]
    pub product: Product,
}

/// Errors that can occur when creating a product
#[derive(Debug, thiserror::Error)]
pub enum CreateProductError {
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

impl CreateProductCommand {
    /// Resolve the effective slug and validate all fields.
    fn validate(&self) -> Result<String, CreateProductError> {
        validate_text(&self.code, "code", MAX_CODE_LENGTH)?;
        validate_text(&self.name, "name", MAX_NAME_LENGTH)?;

        let slug = match &self.slug {
            Some(slug) => slug.trim().to_string(),
            None => lcp_common::slugify(&self.name),
        };
        validate_slug(&slug, MAX_SLUG_LENGTH)?;

        Ok(slug)
    }
}

/// Handler function to create a new product
#[tracing::instrument(skip(pool, command), fields(code = %command.code))]
pub async fn handle(
    pool: SqlitePool,
    command: CreateProductCommand,
) -> Result<CreateProductResponse, CreateProductError> {
    let slug = command.validate()?;

    if let Some(category_id) = command.category_id {
        ensure_category_exists(&pool, category_id).await?;
    }

    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (code, name, slug, description, specifications, image, featured, category_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        RETURNING id, code, name, slug, description, specifications, image,
                  featured, category_id, created_at, updated_at
        "#,
    )
    .bind(command.code.trim())
    .bind(command.name.trim())
    .bind(&slug)
    .bind(&command.description)
    .bind(&command.specifications)
    .bind(&command.image)
    .bind(command.featured)
    .bind(command.category_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        map_unique_violation(e, CreateProductError::DuplicateSlug(slug.clone()), |e| {
            CreateProductError::Database(e)
        })
    })?;

    tracing::info!(product_id = product.id, slug = %product.slug, "Product created");

    Ok(CreateProductResponse { product })
}

pub(crate) async fn ensure_category_exists(
    pool: &SqlitePool,
    category_id: i64,
) -> Result<(), CreateProductError> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?1")
        .bind(category_id)
        .fetch_optional(pool)
        .await?;

    if exists.is_none() {
        return Err(CreateProductError::UnknownCategory(category_id));
    }
    Ok(())
}
