use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single syndicated post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub key: String,
    pub title: String,
    pub channel_key: String,
    pub date: DateTime<Utc>,
    /// Body as stored by the crawler. May hold raw or already-escaped HTML.
    pub content: String,
}

/// The feed source that groups items sharing a `channel_key`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub key: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Home,
    Post,
    Search,
    Channel,
}

/// Outcome of the channel metadata lookup made by the channel route.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ChannelLookup {
    #[default]
    NotRequested,
    Found,
    /// The store failed for a reason other than "no such channel"; the page
    /// renders with an empty placeholder channel.
    Failed(String),
}

/// Everything a template needs to render one response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    pub title: String,
    pub header: Option<String>,
    pub post: Option<Item>,
    pub items: Vec<Item>,
    pub channels: Vec<Channel>,
    pub message: Option<String>,
    pub channel_lookup: ChannelLookup,
    /// 1-based page number being shown.
    pub page: u64,
    pub next_page: Option<u64>,
    /// Path that pagination links are appended to.
    pub path: String,
}

impl Page {
    /// Bag for the home shell carrying only a message, used by the not-found
    /// and error responses.
    pub fn message(site_title: &str, message: impl Into<String>) -> Self {
        Self {
            title: site_title.to_string(),
            message: Some(message.into()),
            page: 1,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_page_has_no_content() {
        let page = Page::message("Dagobah", "No Articles");
        assert_eq!(page.title, "Dagobah");
        assert_eq!(page.message.as_deref(), Some("No Articles"));
        assert!(page.items.is_empty());
        assert!(page.post.is_none());
        assert!(page.channels.is_empty());
    }

    #[test]
    fn test_channel_lookup_serialization() {
        let json = serde_json::to_value(ChannelLookup::Failed("timeout".to_string())).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "timeout");

        let json = serde_json::to_value(ChannelLookup::Found).unwrap();
        assert_eq!(json["status"], "found");
    }

    #[test]
    fn test_route_kind_serialization() {
        assert_eq!(serde_json::to_string(&RouteKind::Search).unwrap(), "\"search\"");
    }
}
