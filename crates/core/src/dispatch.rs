//! Turns a page request into store lookups and a [`Page`].

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::PageError;
use crate::pagination::{page_number, resolve_offset, take_page, FETCH_LIMIT};
use crate::store::{ContentStore, ItemQuery};
use crate::types::{Channel, ChannelLookup, Item, Page, RouteKind};

/// One inbound content request.
///
/// Post keys, search queries and channel keys are the raw wildcard captures
/// from the router: the first character is a separator and is dropped
/// before use. `page` is the untrusted `p` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Home { page: Option<String> },
    Post { key: String },
    Search { query: String, page: Option<String> },
    Channel { key: String, page: Option<String> },
}

impl PageRequest {
    pub fn kind(&self) -> RouteKind {
        match self {
            Self::Home { .. } => RouteKind::Home,
            Self::Post { .. } => RouteKind::Post,
            Self::Search { .. } => RouteKind::Search,
            Self::Channel { .. } => RouteKind::Channel,
        }
    }
}

/// Strip the leading separator from a raw capture. Captures shorter than two
/// characters carry no key.
pub fn route_param(raw: &str) -> Option<&str> {
    let mut chars = raw.chars();
    chars.next()?;
    let rest = chars.as_str();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Characters re-encoded when a decoded capture is written back into a link.
const PATH_CAPTURE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Link path for a listing route, with the raw capture percent-encoded.
fn listing_path(prefix: &str, raw: &str) -> String {
    format!("{prefix}{}", utf8_percent_encode(raw, PATH_CAPTURE))
}

pub struct Dispatcher<'a> {
    store: &'a dyn ContentStore,
    site_title: &'a str,
}

impl<'a> Dispatcher<'a> {
    pub fn new(store: &'a dyn ContentStore, site_title: &'a str) -> Self {
        Self { store, site_title }
    }

    pub async fn resolve(&self, request: &PageRequest) -> Result<Page, PageError> {
        match request {
            PageRequest::Home { page } => self.home(page.as_deref()).await,
            PageRequest::Post { key } => self.post(key).await,
            PageRequest::Search { query, page } => self.search(query, page.as_deref()).await,
            PageRequest::Channel { key, page } => self.channel(key, page.as_deref()).await,
        }
    }

    pub async fn home(&self, page: Option<&str>) -> Result<Page, PageError> {
        let query = ItemQuery::all()
            .newest_first()
            .skip(resolve_offset(page))
            .limit(FETCH_LIMIT);

        let (items, channels) =
            tokio::try_join!(self.store.find_items(&query), self.store.all_channels())?;

        if items.is_empty() {
            return Err(PageError::NoArticles);
        }

        Ok(listing(
            self.site_title.to_string(),
            None,
            items,
            channels,
            page,
            "/".to_string(),
        ))
    }

    pub async fn post(&self, raw_key: &str) -> Result<Page, PageError> {
        let key = route_param(raw_key).ok_or(PageError::InvalidPostKey)?;

        // Context list is always the newest page, not the neighbours of `key`.
        let recent = ItemQuery::all().newest_first().limit(FETCH_LIMIT);

        let (items, post, channels) = tokio::try_join!(
            self.store.find_items(&recent),
            self.store.find_item(key),
            self.store.all_channels()
        )?;

        // An unknown key still renders the page, just without a post.
        if post.is_none() {
            tracing::debug!(key, "post not found");
        }

        let (items, next) = take_page(items, 1);
        Ok(Page {
            title: post.as_ref().map(|p| p.title.clone()).unwrap_or_default(),
            post,
            items,
            channels,
            page: 1,
            next_page: next,
            path: "/".to_string(),
            ..Page::default()
        })
    }

    pub async fn search(&self, raw_query: &str, page: Option<&str>) -> Result<Page, PageError> {
        let q = route_param(raw_query).ok_or(PageError::QueryTooShort)?;

        let query = ItemQuery::text(q).skip(resolve_offset(page)).limit(FETCH_LIMIT);

        let (items, channels) =
            tokio::try_join!(self.store.find_items(&query), self.store.all_channels())?;

        if items.is_empty() {
            return Err(PageError::NoSearchResults(q.to_string()));
        }

        Ok(listing(
            q.to_string(),
            Some(q.to_string()),
            items,
            channels,
            page,
            listing_path("/search/", raw_query),
        ))
    }

    pub async fn channel(&self, raw_key: &str, page: Option<&str>) -> Result<Page, PageError> {
        let key = route_param(raw_key).ok_or(PageError::InvalidChannelKey)?;

        let query = ItemQuery::channel_eq(key)
            .newest_first()
            .skip(resolve_offset(page))
            .limit(FETCH_LIMIT);

        let (items, channels) =
            tokio::try_join!(self.store.find_items(&query), self.store.all_channels())?;

        if items.is_empty() {
            return Err(PageError::NoArticles);
        }

        let (current, lookup) = match self.store.find_channel(key).await {
            Ok(Some(channel)) => (channel, ChannelLookup::Found),
            Ok(None) => return Err(PageError::UnknownChannel),
            Err(err) => {
                tracing::warn!(channel = key, error = %err, "channel lookup failed, rendering without metadata");
                (Channel::default(), ChannelLookup::Failed(err.to_string()))
            }
        };

        let mut page = listing(
            current.title.clone(),
            Some(current.title),
            items,
            channels,
            page,
            listing_path("/channel/", raw_key),
        );
        page.channel_lookup = lookup;
        Ok(page)
    }
}

fn listing(
    title: String,
    header: Option<String>,
    fetched: Vec<Item>,
    channels: Vec<Channel>,
    raw_page: Option<&str>,
    path: String,
) -> Page {
    let current = page_number(raw_page);
    let (items, next_page) = take_page(fetched, current);
    Page {
        title,
        header,
        post: items.first().cloned(),
        next_page,
        items,
        channels,
        page: current,
        path,
        ..Page::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PAGE_SIZE;
    use crate::store::{MemoryStore, StoreError, StoreResult};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    fn item(n: i64, channel: &str, content: &str) -> Item {
        Item {
            key: format!("post-{n}"),
            title: format!("Post {n}"),
            channel_key: channel.to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(n),
            content: content.to_string(),
        }
    }

    fn channel(key: &str, title: &str) -> Channel {
        Channel {
            key: key.to_string(),
            title: title.to_string(),
        }
    }

    fn fixture(count: i64) -> MemoryStore {
        let items = (0..count)
            .map(|n| item(n, if n % 2 == 0 { "rust" } else { "go" }, "systems programming"))
            .collect();
        MemoryStore::new(items, vec![channel("rust", "Rust Blog"), channel("go", "Go Blog")])
    }

    #[test]
    fn test_route_param() {
        assert_eq!(route_param(""), None);
        assert_eq!(route_param("/"), None);
        assert_eq!(route_param("/a"), Some("a"));
        assert_eq!(route_param("xgolangx"), Some("golangx"));
        assert_eq!(route_param("éabc"), Some("abc"));
    }

    #[tokio::test]
    async fn test_home_first_page() {
        let store = fixture(25);
        let page = Dispatcher::new(&store, "Dagobah").home(None).await.unwrap();

        assert_eq!(page.title, "Dagobah");
        assert_eq!(page.items.len(), PAGE_SIZE as usize);
        assert_eq!(page.items[0].key, "post-24");
        assert_eq!(page.post.as_ref().unwrap().key, "post-24");
        assert!(page.items.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(page.channels.len(), 2);
        assert_eq!(page.next_page, Some(2));
    }

    #[tokio::test]
    async fn test_home_last_page() {
        let store = fixture(25);
        let page = Dispatcher::new(&store, "Dagobah").home(Some("3")).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].key, "post-4");
        assert_eq!(page.page, 3);
        assert_eq!(page.next_page, None);
    }

    #[tokio::test]
    async fn test_home_past_end_is_not_found() {
        let store = fixture(5);
        let err = Dispatcher::new(&store, "Dagobah").home(Some("2")).await.unwrap_err();
        assert!(matches!(err, PageError::NoArticles));
    }

    #[tokio::test]
    async fn test_short_params_skip_the_store() {
        let store = fixture(5);
        let dispatcher = Dispatcher::new(&store, "Dagobah");

        assert!(matches!(dispatcher.post("/").await, Err(PageError::InvalidPostKey)));
        assert!(matches!(dispatcher.search("", None).await, Err(PageError::QueryTooShort)));
        assert!(matches!(
            dispatcher.channel("~", None).await,
            Err(PageError::InvalidChannelKey)
        ));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_post_uses_recent_page_as_context() {
        let store = fixture(15);
        let page = Dispatcher::new(&store, "Dagobah").post("~post-3").await.unwrap();
        assert_eq!(page.title, "Post 3");
        assert_eq!(page.post.unwrap().key, "post-3");
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].key, "post-14");
    }

    #[tokio::test]
    async fn test_post_unknown_key_renders_without_post() {
        let store = fixture(3);
        let page = Dispatcher::new(&store, "Dagobah").post("~nope").await.unwrap();
        assert_eq!(page.title, "");
        assert!(page.post.is_none());
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.channels.len(), 2);
    }

    #[tokio::test]
    async fn test_exact_multiple_offers_no_next_page() {
        let store = fixture(20);
        let dispatcher = Dispatcher::new(&store, "Dagobah");

        let first = dispatcher.home(None).await.unwrap();
        assert_eq!(first.next_page, Some(2));

        let second = dispatcher.home(Some("2")).await.unwrap();
        assert_eq!(second.items.len(), 10);
        assert_eq!(second.items[9].key, "post-0");
        assert_eq!(second.next_page, None);
    }

    #[tokio::test]
    async fn test_search_path_is_reencoded() {
        let items = (0..15).map(|n| item(n, "rust", "c# interop")).collect();
        let store = MemoryStore::new(items, vec![]);
        let page = Dispatcher::new(&store, "Dagobah")
            .search("~c#", None)
            .await
            .unwrap();
        assert_eq!(page.title, "c#");
        assert_eq!(page.path, "/search/~c%23");
        assert_eq!(page.next_page, Some(2));
    }

    #[test]
    fn test_listing_path_encoding() {
        assert_eq!(listing_path("/search/", "~rust async"), "/search/~rust%20async");
        assert_eq!(listing_path("/search/", "~50%?"), "/search/~50%25%3F");
        assert_eq!(listing_path("/channel/", "~a/b"), "/channel/~a/b");
    }

    #[tokio::test]
    async fn test_search_strips_separator() {
        let store = MemoryStore::new(
            vec![item(1, "go", "golang generics"), item(2, "rust", "traits")],
            vec![],
        );
        let page = Dispatcher::new(&store, "Dagobah")
            .search("~golang", None)
            .await
            .unwrap();
        assert_eq!(page.title, "golang");
        assert_eq!(page.header.as_deref(), Some("golang"));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.path, "/search/~golang");
    }

    #[tokio::test]
    async fn test_search_no_results_message() {
        let store = fixture(3);
        let err = Dispatcher::new(&store, "Dagobah")
            .search("xgolangx", None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No Articles for query 'golangx'");
    }

    #[tokio::test]
    async fn test_channel_listing() {
        let store = fixture(30);
        let page = Dispatcher::new(&store, "Dagobah")
            .channel("~rust", Some("2"))
            .await
            .unwrap();
        assert_eq!(page.title, "Rust Blog");
        assert_eq!(page.header.as_deref(), Some("Rust Blog"));
        assert_eq!(page.items.len(), 5);
        assert!(page.items.iter().all(|i| i.channel_key == "rust"));
        assert_eq!(page.channel_lookup, ChannelLookup::Found);
    }

    #[tokio::test]
    async fn test_channel_with_items_but_no_record() {
        let store = MemoryStore::new(vec![item(1, "orphan", "x")], vec![]);
        let err = Dispatcher::new(&store, "Dagobah")
            .channel("~orphan", None)
            .await
            .unwrap_err();
        assert!(matches!(err, PageError::UnknownChannel));
    }

    #[tokio::test]
    async fn test_channel_without_items_or_record_reports_no_articles() {
        let store = fixture(4);
        let err = Dispatcher::new(&store, "Dagobah")
            .channel("~ghost", None)
            .await
            .unwrap_err();
        assert!(matches!(err, PageError::NoArticles));
    }

    struct BrokenChannelLookup(MemoryStore);

    #[async_trait]
    impl ContentStore for BrokenChannelLookup {
        async fn find_items(&self, query: &ItemQuery) -> StoreResult<Vec<Item>> {
            self.0.find_items(query).await
        }

        async fn find_item(&self, key: &str) -> StoreResult<Option<Item>> {
            self.0.find_item(key).await
        }

        async fn find_channel(&self, _key: &str) -> StoreResult<Option<Channel>> {
            Err(StoreError::backend(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            )))
        }

        async fn all_channels(&self) -> StoreResult<Vec<Channel>> {
            self.0.all_channels().await
        }
    }

    #[tokio::test]
    async fn test_channel_lookup_failure_is_not_fatal() {
        let store = BrokenChannelLookup(fixture(6));
        let page = Dispatcher::new(&store, "Dagobah")
            .channel("~go", None)
            .await
            .unwrap();
        assert_eq!(page.title, "");
        assert_eq!(page.items.len(), 3);
        assert!(matches!(page.channel_lookup, ChannelLookup::Failed(ref reason) if reason.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_resolve_routes_by_kind() {
        let store = fixture(3);
        let dispatcher = Dispatcher::new(&store, "Dagobah");
        let request = PageRequest::Channel {
            key: "~go".to_string(),
            page: None,
        };
        assert_eq!(request.kind(), RouteKind::Channel);
        let page = dispatcher.resolve(&request).await.unwrap();
        assert_eq!(page.title, "Go Blog");
    }
}
