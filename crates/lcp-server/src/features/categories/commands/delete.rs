//! Delete category command
//!
//! Products referencing the category are detached (their `category_id` is
//! cleared), never deleted. The detach runs in the same transaction as the
//! delete so a failure leaves both tables untouched.

use sqlx::SqlitePool;

/// Response from deleting a category
#[derive(Debug)]
pub struct DeleteCategoryResponse {
    /// Number of products that were detached from the category.
    pub detached_products: u64,
}

/// Errors that can occur when deleting a category
#[derive(Debug, thiserror::Error)]
pub enum DeleteCategoryError {
    #[error("Category not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function to delete a category by slug
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    slug: &str,
) -> Result<DeleteCategoryResponse, DeleteCategoryError> {
    let mut tx = pool.begin().await?;

    let category_id: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE slug = ?1")
        .bind(slug)
        .fetch_optional(&mut *tx)
        .await?;
    let category_id = category_id.ok_or(DeleteCategoryError::NotFound)?;

    let detached = sqlx::query("UPDATE products SET category_id = NULL WHERE category_id = ?1")
        .bind(category_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM categories WHERE id = ?1")
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(slug, detached_products = detached, "Category deleted");

    Ok(DeleteCategoryResponse {
        detached_products: detached,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_delete_detaches_products(pool: SqlitePool) {
        sqlx::query("INSERT INTO categories (slug, name) VALUES ('sheaves', 'Sheaves')")
            .execute(&pool)
            .await
            .unwrap();
        let category_id: i64 = sqlx::query_scalar("SELECT id FROM categories")
            .fetch_one(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO products (code, name, slug, category_id) VALUES ('EL-1', 'W', 'w', ?1)",
        )
        .bind(category_id)
        .execute(&pool)
        .await
        .unwrap();

        let response = handle(pool.clone(), "sheaves").await.unwrap();
        assert_eq!(response.detached_products, 1);

        let orphan: Option<i64> = sqlx::query_scalar("SELECT category_id FROM products")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orphan, None);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_delete_missing_category(pool: SqlitePool) {
        assert!(matches!(
            handle(pool, "nope").await,
            Err(DeleteCategoryError::NotFound)
        ));
    }
}
