//! Backend-agnostic content store interface.
//!
//! Handlers describe item lookups with [`ItemQuery`] and run them through a
//! [`ContentStore`]. The Postgres implementation lives in `dagobah-db`;
//! [`MemoryStore`] backs tests and local demos.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::types::{Channel, Item};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemFilter {
    All,
    ChannelKey(String),
    /// Full-text match over title and content.
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    DateDesc,
}

/// Filter, sort, skip and limit for an item lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub filter: ItemFilter,
    /// `None` keeps whatever order the store produces for the filter.
    pub sort: Option<SortOrder>,
    pub skip: u64,
    pub limit: Option<u64>,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self::all()
    }
}

impl ItemQuery {
    pub fn all() -> Self {
        Self {
            filter: ItemFilter::All,
            sort: None,
            skip: 0,
            limit: None,
        }
    }

    pub fn channel_eq(channel_key: impl Into<String>) -> Self {
        Self {
            filter: ItemFilter::ChannelKey(channel_key.into()),
            ..Self::all()
        }
    }

    pub fn text(query: impl Into<String>) -> Self {
        Self {
            filter: ItemFilter::Text(query.into()),
            ..Self::all()
        }
    }

    pub fn newest_first(mut self) -> Self {
        self.sort = Some(SortOrder::DateDesc);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn find_items(&self, query: &ItemQuery) -> StoreResult<Vec<Item>>;

    /// Most recent item with the given key.
    async fn find_item(&self, key: &str) -> StoreResult<Option<Item>>;

    async fn find_channel(&self, key: &str) -> StoreResult<Option<Channel>>;

    async fn all_channels(&self) -> StoreResult<Vec<Channel>>;
}
