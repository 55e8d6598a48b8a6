use serde::Deserialize;

pub const DEFAULT_TITLE: &str = "Dagobah";
pub const DEFAULT_PORT: u16 = 1138;

/// Process-wide, read-only settings handed to every handler.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub title: String,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub db_max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let database_url =
            std::env::var("DATABASE_URL").or_else(|_| std::env::var("DAGOBAH_DATABASE_URL"))?;
        let title = std::env::var("DAGOBAH_TITLE").unwrap_or_else(|_| DEFAULT_TITLE.to_string());
        let host = std::env::var("DAGOBAH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("DAGOBAH_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let static_dir =
            std::env::var("DAGOBAH_STATIC_DIR").unwrap_or_else(|_| "static".to_string());
        let db_max_connections = std::env::var("DAGOBAH_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            database_url,
            title,
            host,
            port,
            static_dir,
            db_max_connections,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
