//! Postgres-backed [`ContentStore`].
//!
//! Expects the tables from `schema.sql`.

pub mod models;
pub mod queries;

use async_trait::async_trait;
use dagobah_core::store::{ContentStore, ItemQuery, StoreError, StoreResult};
use dagobah_core::types::{Channel, Item};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn find_items(&self, query: &ItemQuery) -> StoreResult<Vec<Item>> {
        let rows = queries::items::find(&self.pool, query)
            .await
            .map_err(StoreError::backend)?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_item(&self, key: &str) -> StoreResult<Option<Item>> {
        let row = queries::items::get_by_key(&self.pool, key)
            .await
            .map_err(StoreError::backend)?;
        Ok(row.map(Item::from))
    }

    async fn find_channel(&self, key: &str) -> StoreResult<Option<Channel>> {
        let row = queries::channels::get_by_key(&self.pool, key)
            .await
            .map_err(StoreError::backend)?;
        Ok(row.map(Channel::from))
    }

    async fn all_channels(&self) -> StoreResult<Vec<Channel>> {
        let rows = queries::channels::list_all(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(rows.into_iter().map(Channel::from).collect())
    }
}
