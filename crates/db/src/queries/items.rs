//! Item lookups.
//!
//! Text search runs against the generated `search_vector` column. No
//! `ORDER BY` is added for it, so results come back in whatever order
//! Postgres produces for the match.

use crate::models::ItemRow;
use dagobah_core::store::{ItemFilter, ItemQuery, SortOrder};
use sqlx::{PgPool, Postgres, QueryBuilder};

const SELECT_ITEMS: &str = "SELECT key, title, channel_key, date, content FROM items";

/// Translate an [`ItemQuery`] into SQL with bound parameters.
pub fn build_find(query: &ItemQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_ITEMS);

    match &query.filter {
        ItemFilter::All => {}
        ItemFilter::ChannelKey(key) => {
            qb.push(" WHERE channel_key = ").push_bind(key.clone());
        }
        ItemFilter::Text(text) => {
            qb.push(" WHERE search_vector @@ plainto_tsquery('english', ")
                .push_bind(text.clone())
                .push(")");
        }
    }

    if let Some(SortOrder::DateDesc) = query.sort {
        qb.push(" ORDER BY date DESC");
    }
    if let Some(limit) = query.limit {
        qb.push(" LIMIT ").push_bind(clamp(limit));
    }
    if query.skip > 0 {
        qb.push(" OFFSET ").push_bind(clamp(query.skip));
    }

    qb
}

fn clamp(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub async fn find(pool: &PgPool, query: &ItemQuery) -> Result<Vec<ItemRow>, sqlx::Error> {
    let mut qb = build_find(query);
    qb.build_query_as::<ItemRow>().fetch_all(pool).await
}

pub async fn get_by_key(pool: &PgPool, key: &str) -> Result<Option<ItemRow>, sqlx::Error> {
    sqlx::query_as::<_, ItemRow>(
        r#"
        SELECT key, title, channel_key, date, content
        FROM items
        WHERE key = $1
        ORDER BY date DESC
        LIMIT 1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await
}
