use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use dagobah_core::PageRequest;

use super::{serve, PageParams};
use crate::{negotiate::RenderMode, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/channel", get(channel_without_key))
        .route("/channel/", get(channel_without_key))
        .route("/channel/{*key}", get(channel))
        .with_state(state)
}

async fn channel(
    State(state): State<AppState>,
    mode: RenderMode,
    Path(key): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    serve(&state, mode, PageRequest::Channel { key, page: params.p }).await
}

async fn channel_without_key(State(state): State<AppState>, mode: RenderMode) -> Response {
    let request = PageRequest::Channel {
        key: String::new(),
        page: None,
    };
    serve(&state, mode, request).await
}
