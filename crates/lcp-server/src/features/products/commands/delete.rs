//! Delete product command

use sqlx::SqlitePool;

/// Errors that can occur when deleting a product
#[derive(Debug, thiserror::Error)]
pub enum DeleteProductError {
    #[error("Product not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function to delete a product by slug
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, slug: &str) -> Result<(), DeleteProductError> {
    let result = sqlx::query("DELETE FROM products WHERE slug = ?1")
        .bind(slug)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteProductError::NotFound);
    }

    tracing::info!(slug, "Product deleted");
    Ok(())
}
