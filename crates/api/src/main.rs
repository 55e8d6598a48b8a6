use std::sync::Arc;

use axum::{http::Request, middleware::from_fn};
use clap::{Parser, Subcommand};
use dagobah_core::Settings;
use dagobah_db::PgStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

mod error;
mod middleware;
mod negotiate;
mod render;
mod routes;
mod state;

use crate::middleware::request_id::request_id;
use crate::state::{AppState, RequestId};

#[derive(Debug, Parser)]
#[command(name = "dagobah")]
#[command(about = "Reader for aggregated feeds", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve all feeds from the content store over HTTP.
    Server {
        /// Port to listen on; overrides DAGOBAH_PORT.
        #[arg(long)]
        port: Option<u16>,
        /// Optional .env file loaded before reading configuration.
        #[arg(long, default_value = ".env")]
        dotenv: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Server { port, dotenv } => server(port, &dotenv).await,
    }
}

async fn server(port: Option<u16>, dotenv: &str) -> anyhow::Result<()> {
    if std::path::Path::new(dotenv).exists() {
        dotenvy::from_path(dotenv)?;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .json()
        .init();

    let mut settings = Settings::from_env()?;
    if let Some(port) = port {
        settings.port = port;
    }

    let store = PgStore::connect(&settings.database_url, settings.db_max_connections).await?;
    let addr = settings.bind_addr();
    let state = AppState::new(Arc::new(store), settings)?;

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            let id = request
                .extensions()
                .get::<RequestId>()
                .map(|id| id.0.as_str())
                .unwrap_or("unknown");
            tracing::span!(
                Level::INFO,
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %id,
            )
        }))
        .layer(from_fn(request_id));

    info!(%addr, "starting dagobah server");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
