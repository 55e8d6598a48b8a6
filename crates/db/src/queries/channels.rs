use crate::models::ChannelRow;
use sqlx::PgPool;

pub async fn get_by_key(pool: &PgPool, key: &str) -> Result<Option<ChannelRow>, sqlx::Error> {
    sqlx::query_as::<_, ChannelRow>(
        r#"
        SELECT key, title
        FROM channels
        WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<ChannelRow>, sqlx::Error> {
    sqlx::query_as::<_, ChannelRow>(
        r#"
        SELECT key, title
        FROM channels
        ORDER BY title ASC
        "#,
    )
    .fetch_all(pool)
    .await
}
