//! Runtime configuration from environment variables (.env honored).

/// Default SQLite URL; the `database/` directory is created on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://database/db.sqlite3";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
}

impl AppConfig {
    /// Read `DATABASE_URL` and `BIND_ADDR`, falling back to the defaults.
    pub fn from_env() -> Self {
        AppConfig {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
        }
    }
}
