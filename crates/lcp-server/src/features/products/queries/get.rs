//! Get product query

use sqlx::SqlitePool;

use crate::features::products::types::Product;

/// Errors that can occur when fetching a product
#[derive(Debug, thiserror::Error)]
pub enum GetProductError {
    #[error("Product not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function to fetch a single product by slug
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, slug: &str) -> Result<Product, GetProductError> {
    sqlx::query_as::<_, Product>(
        r#"
        SELECT id, code, name, slug, description, specifications, image,
               featured, category_id, created_at, updated_at
        FROM products WHERE slug = ?1
        "#,
    )
    .bind(slug)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetProductError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_get_product(pool: SqlitePool) {
        sqlx::query("INSERT INTO products (code, name, slug) VALUES ('EL-1', 'Widget', 'widget')")
            .execute(&pool)
            .await
            .unwrap();

        let product = handle(pool, "widget").await.unwrap();
        assert_eq!(product.code, "EL-1");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_get_missing_product(pool: SqlitePool) {
        assert!(matches!(handle(pool, "nope").await, Err(GetProductError::NotFound)));
    }
}
