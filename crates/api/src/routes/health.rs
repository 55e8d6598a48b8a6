use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new().route("/ping", get(ping)).with_state(state)
}

async fn ping() -> &'static str {
    "pong"
}
