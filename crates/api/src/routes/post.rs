use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use dagobah_core::PageRequest;

use super::serve;
use crate::{negotiate::RenderMode, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/post", get(post_without_key))
        .route("/post/", get(post_without_key))
        .route("/post/{*key}", get(post))
        .with_state(state)
}

async fn post(
    State(state): State<AppState>,
    mode: RenderMode,
    Path(key): Path<String>,
) -> Response {
    serve(&state, mode, PageRequest::Post { key }).await
}

async fn post_without_key(State(state): State<AppState>, mode: RenderMode) -> Response {
    serve(&state, mode, PageRequest::Post { key: String::new() }).await
}
