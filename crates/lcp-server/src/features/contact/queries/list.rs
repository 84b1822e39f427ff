//! List contact messages query (admin inbox)

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::features::contact::types::ContactMessage;
use crate::features::shared::pagination::{Paginated, PaginationParams};

/// Query parameters for the admin inbox
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListContactMessagesQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Include submissions the honeypot flagged as spam.
    #[serde(default)]
    pub include_spam: bool,
}

/// Handler function to list contact messages, newest first.
#[tracing::instrument(skip(pool, query))]
pub async fn handle(
    pool: SqlitePool,
    query: ListContactMessagesQuery,
) -> Result<Paginated<ContactMessage>, sqlx::Error> {
    let spam_cap: i64 = if query.include_spam { 1 } else { 0 };

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE is_spam <= ?1")
            .bind(spam_cap)
            .fetch_one(&pool)
            .await?;

    let items = sqlx::query_as::<_, ContactMessage>(
        "SELECT id, name, email, company, phone, message, is_spam, created_at \
         FROM contact_messages WHERE is_spam <= ?1 \
         ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3",
    )
    .bind(spam_cap)
    .bind(query.pagination.per_page())
    .bind(query.pagination.offset())
    .fetch_all(&pool)
    .await?;

    Ok(Paginated::from_items(items, &query.pagination, total))
}
