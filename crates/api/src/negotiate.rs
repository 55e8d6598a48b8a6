//! Full page or fragment, decided once per request from `X-Requested-With`.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use dagobah_core::RouteKind;

use crate::render::Template;

pub const REQUESTED_WITH: &str = "x-requested-with";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    FullPage,
    /// Asynchronous in-page update; only the changed region is rendered.
    Fragment,
}

impl RenderMode {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let is_xhr = headers
            .get(REQUESTED_WITH)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.eq_ignore_ascii_case("xmlhttprequest"));
        if is_xhr {
            Self::Fragment
        } else {
            Self::FullPage
        }
    }
}

impl<S> FromRequestParts<S> for RenderMode
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

pub fn select_template(mode: RenderMode, kind: RouteKind) -> Template {
    match (mode, kind) {
        (RenderMode::FullPage, _) => Template::Home,
        (RenderMode::Fragment, RouteKind::Post) => Template::Main,
        (RenderMode::Fragment, _) => Template::Items,
    }
}
