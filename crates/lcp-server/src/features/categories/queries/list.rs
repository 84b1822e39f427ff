//! List categories query
//!
//! The category set is small (tens of rows), so the listing is not
//! paginated; it returns every category in navigation order.

use sqlx::SqlitePool;

use crate::features::categories::types::Category;

/// Handler function to list all categories, ordered by position then name.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "SELECT id, slug, name, description, position, created_at, updated_at \
         FROM categories ORDER BY position, name",
    )
    .fetch_all(&pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_list_ordered_by_position_then_name(pool: SqlitePool) {
        for (slug, name, position) in [
            ("rails", "Rails", 2),
            ("doors", "Doors", 1),
            ("cables", "Cables", 1),
        ] {
            sqlx::query("INSERT INTO categories (slug, name, position) VALUES (?1, ?2, ?3)")
                .bind(slug)
                .bind(name)
                .bind(position)
                .execute(&pool)
                .await
                .unwrap();
        }

        let categories = handle(pool).await.unwrap();
        let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["cables", "doors", "rails"]);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_list_empty(pool: SqlitePool) {
        assert!(handle(pool).await.unwrap().is_empty());
    }
}
