//! Not-found and failure responses.
//!
//! Both render the home shell with a message and the site title; nothing
//! else from the request reaches the template.

use axum::http::StatusCode;
use axum::response::Response;
use dagobah_core::{Page, PageError};

use crate::render::Template;
use crate::state::AppState;

pub const INTERNAL_MESSAGE: &str = "Something went wrong";

/// Status and reader-facing message for a failed page request.
#[derive(Debug, PartialEq, Eq)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
}

impl From<PageError> for ErrorPage {
    fn from(err: PageError) -> Self {
        if err.is_not_found() {
            Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            }
        } else {
            tracing::error!(error = %err, "content fetch failed");
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: INTERNAL_MESSAGE.to_string(),
            }
        }
    }
}

impl ErrorPage {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn respond(self, state: &AppState) -> Response {
        let page = Page::message(&state.settings.title, self.message);
        state.render(self.status, Template::Home, &page)
    }
}
