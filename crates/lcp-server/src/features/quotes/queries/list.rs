//! List quote requests query (admin)

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::features::quotes::types::QuoteRequest;
use crate::features::shared::pagination::{Paginated, PaginationParams};

/// Query parameters for listing quote requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuotesQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Restrict to one configurator product kind.
    pub product_kind: Option<String>,
}

/// Handler function to list quote requests, newest first.
#[tracing::instrument(skip(pool, query))]
pub async fn handle(
    pool: SqlitePool,
    query: ListQuotesQuery,
) -> Result<Paginated<QuoteRequest>, sqlx::Error> {
    // `?1 IS NULL` collapses the filter when no kind is given.
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM quote_requests WHERE (?1 IS NULL OR product_kind = ?1)",
    )
    .bind(&query.product_kind)
    .fetch_one(&pool)
    .await?;

    let items = sqlx::query_as::<_, QuoteRequest>(
        "SELECT id, reference, product_kind, selections, contact_name, contact_email, \
         message, created_at FROM quote_requests \
         WHERE (?1 IS NULL OR product_kind = ?1) \
         ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3",
    )
    .bind(&query.product_kind)
    .bind(query.pagination.per_page())
    .bind(query.pagination.offset())
    .fetch_all(&pool)
    .await?;

    Ok(Paginated::from_items(items, &query.pagination, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(pool: &SqlitePool, reference: &str, kind: &str) {
        sqlx::query(
            "INSERT INTO quote_requests (reference, product_kind, selections, contact_name, contact_email) \
             VALUES (?1, ?2, '{\"stops\":4}', 'Jean', 'j@example.com')",
        )
        .bind(reference)
        .bind(kind)
        .execute(pool)
        .await
        .unwrap();
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_list_quotes(pool: SqlitePool) {
        seed(&pool, "ref-1", "passenger-lift").await;
        seed(&pool, "ref-2", "goods-lift").await;

        let all = handle(pool.clone(), ListQuotesQuery::default()).await.unwrap();
        assert_eq!(all.pagination.total, 2);
        assert_eq!(all.items[0].selections.get("stops"), Some(&serde_json::json!(4)));

        let filtered = handle(
            pool,
            ListQuotesQuery {
                product_kind: Some("goods-lift".to_string()),
                ..ListQuotesQuery::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(filtered.items.len(), 1);
        assert_eq!(filtered.items[0].reference, "ref-2");
    }
}
