//! HTTP surface.
//!
//! - `GET /ping` liveness probe
//! - `GET /` home timeline, `?p=` page
//! - `GET /post/{*key}` single post; `/post` and `/post/` carry no key
//! - `GET /search/{*query}` text search, `?p=` page
//! - `GET /channel/{*key}` channel timeline, `?p=` page
//! - `GET /static/...` assets from the configured directory

pub mod channel;
pub mod health;
pub mod home;
pub mod post;
pub mod search;

use axum::{extract::State, http::StatusCode, response::Response, Router};
use dagobah_core::{Dispatcher, PageRequest};
use serde::Deserialize;
use tower_http::services::ServeDir;

use crate::{
    error::ErrorPage,
    negotiate::{select_template, RenderMode},
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    p: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.settings.static_dir);
    let fallback = Router::new()
        .fallback(page_not_found)
        .with_state(state.clone());

    Router::new()
        .merge(health::router(state.clone()))
        .merge(home::router(state.clone()))
        .merge(post::router(state.clone()))
        .merge(search::router(state.clone()))
        .merge(channel::router(state))
        .nest_service("/static", static_files)
        .fallback_service(fallback)
}

/// Resolve `request` and render it, or render the not-found shell.
pub(crate) async fn serve(state: &AppState, mode: RenderMode, request: PageRequest) -> Response {
    let dispatcher = Dispatcher::new(state.store.as_ref(), &state.settings.title);
    match dispatcher.resolve(&request).await {
        Ok(page) => {
            let template = select_template(mode, request.kind());
            state.render(StatusCode::OK, template, &page)
        }
        Err(err) => {
            tracing::debug!(kind = ?request.kind(), reason = %err, "no content page");
            ErrorPage::from(err).respond(state)
        }
    }
}

async fn page_not_found(State(state): State<AppState>) -> Response {
    ErrorPage::not_found("Page not found").respond(&state)
}
