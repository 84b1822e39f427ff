//! List products query
//!
//! Public catalog listing with optional filters, paginated.

use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::features::products::types::Product;
use crate::features::shared::pagination::{Paginated, PaginationParams};

/// Query parameters for listing products
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Restrict to a category, addressed by slug.
    pub category: Option<String>,

    /// Restrict to featured products.
    pub featured: Option<bool>,

    /// Case-insensitive substring match on code or name.
    pub search: Option<String>,
}

/// Handler function to list products
#[tracing::instrument(skip(pool, query))]
pub async fn handle(
    pool: SqlitePool,
    query: ListProductsQuery,
) -> Result<Paginated<Product>, sqlx::Error> {
    let mut count_builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT COUNT(*) FROM products p");
    let mut list_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT p.id, p.code, p.name, p.slug, p.description, p.specifications, p.image, \
         p.featured, p.category_id, p.created_at, p.updated_at FROM products p",
    );

    for builder in [&mut count_builder, &mut list_builder] {
        builder.push(" WHERE 1=1");

        if let Some(category) = &query.category {
            builder
                .push(" AND p.category_id = (SELECT id FROM categories WHERE slug = ")
                .push_bind(category.clone())
                .push(")");
        }
        if let Some(featured) = query.featured {
            builder.push(" AND p.featured = ").push_bind(featured);
        }
        if let Some(search) = &query.search {
            let pattern = format!("%{}%", search.trim());
            builder
                .push(" AND (p.code LIKE ")
                .push_bind(pattern.clone())
                .push(" COLLATE NOCASE OR p.name LIKE ")
                .push_bind(pattern)
                .push(" COLLATE NOCASE)");
        }
    }

    let total: i64 = count_builder.build_query_scalar().fetch_one(&pool).await?;

    list_builder
        .push(" ORDER BY p.name, p.id LIMIT ")
        .push_bind(query.pagination.per_page())
        .push(" OFFSET ")
        .push_bind(query.pagination.offset());

    let items = list_builder
        .build_query_as::<Product>()
        .fetch_all(&pool)
        .await?;

    Ok(Paginated::from_items(items, &query.pagination, total))
}
