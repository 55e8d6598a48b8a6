use chrono::{DateTime, Utc};
use dagobah_core::types::{Channel, Item};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ItemRow {
    pub key: String,
    pub title: String,
    pub channel_key: String,
    pub date: DateTime<Utc>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChannelRow {
    pub key: String,
    pub title: String,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            key: row.key,
            title: row.title,
            channel_key: row.channel_key,
            date: row.date,
            content: row.content,
        }
    }
}

impl From<ChannelRow> for Channel {
    fn from(row: ChannelRow) -> Self {
        Channel {
            key: row.key,
            title: row.title,
        }
    }
}
