use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use dagobah_core::PageRequest;

use super::{serve, PageParams};
use crate::{negotiate::RenderMode, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(home)).with_state(state)
}

async fn home(
    State(state): State<AppState>,
    mode: RenderMode,
    Query(params): Query<PageParams>,
) -> Response {
    serve(&state, mode, PageRequest::Home { page: params.p }).await
}
