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
        .route("/search", get(search_without_query))
        .route("/search/", get(search_without_query))
        .route("/search/{*query}", get(search))
        .with_state(state)
}

async fn search(
    State(state): State<AppState>,
    mode: RenderMode,
    Path(query): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    serve(&state, mode, PageRequest::Search { query, page: params.p }).await
}

async fn search_without_query(State(state): State<AppState>, mode: RenderMode) -> Response {
    let request = PageRequest::Search {
        query: String::new(),
        page: None,
    };
    serve(&state, mode, request).await
}
