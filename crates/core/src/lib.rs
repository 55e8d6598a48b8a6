//! Request-to-content resolution for the Dagobah feed reader.
//!
//! Everything here is independent of HTTP and of the storage backend:
//! pagination, the store query vocabulary, per-route dispatch, the
//! not-found policy and the HTML normalization applied at render time.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod pagination;
pub mod sanitize;
pub mod store;
pub mod types;

pub use config::Settings;
pub use dispatch::{Dispatcher, PageRequest};
pub use error::PageError;
pub use store::{ContentStore, ItemQuery, MemoryStore, StoreError};
pub use types::{Channel, ChannelLookup, Item, Page, RouteKind};
