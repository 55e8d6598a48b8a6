use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ContentStore, ItemFilter, ItemQuery, SortOrder, StoreResult};
use crate::types::{Channel, Item};

/// In-process store over fixed vectors.
///
/// Text search matches items whose title or content contains every
/// whitespace-separated term (case-insensitive) and keeps insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Vec<Item>,
    channels: Vec<Channel>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new(items: Vec<Item>, channels: Vec<Channel>) -> Self {
        Self {
            items,
            channels,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of store operations served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

fn matches(item: &Item, filter: &ItemFilter) -> bool {
    match filter {
        ItemFilter::All => true,
        ItemFilter::ChannelKey(key) => item.channel_key == *key,
        ItemFilter::Text(query) => {
            let haystack = format!("{} {}", item.title, item.content).to_lowercase();
            let mut terms = query.split_whitespace().peekable();
            terms.peek().is_some()
                && terms.all(|term| haystack.contains(&term.to_lowercase()))
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find_items(&self, query: &ItemQuery) -> StoreResult<Vec<Item>> {
        self.record_call();

        let mut found: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| matches(item, &query.filter))
            .collect();

        if let Some(SortOrder::DateDesc) = query.sort {
            found.sort_by(|a, b| b.date.cmp(&a.date));
        }

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .and_then(|limit| usize::try_from(limit).ok())
            .unwrap_or(usize::MAX);

        Ok(found.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn find_item(&self, key: &str) -> StoreResult<Option<Item>> {
        self.record_call();
        Ok(self
            .items
            .iter()
            .filter(|item| item.key == key)
            .max_by_key(|item| item.date)
            .cloned())
    }

    async fn find_channel(&self, key: &str) -> StoreResult<Option<Channel>> {
        self.record_call();
        Ok(self.channels.iter().find(|channel| channel.key == key).cloned())
    }

    async fn all_channels(&self) -> StoreResult<Vec<Channel>> {
        self.record_call();
        Ok(self.channels.clone())
    }
}
