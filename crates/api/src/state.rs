use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use dagobah_core::{ContentStore, Page, Settings};

use crate::render::{Renderer, Template};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub settings: Arc<Settings>,
    pub renderer: Arc<Renderer>,
}

#[derive(Clone, Debug)]
pub struct RequestId(pub String);

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, settings: Settings) -> Result<Self, minijinja::Error> {
        let renderer = Renderer::new(&settings.title)?;
        Ok(Self {
            store,
            settings: Arc::new(settings),
            renderer: Arc::new(renderer),
        })
    }

    /// Render `page` through `template` with the given status.
    pub fn render(&self, status: StatusCode, template: Template, page: &Page) -> Response {
        match self.renderer.render(template, page) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(template = template.name(), error = %err, "template render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
