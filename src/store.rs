//! SQLite bootstrap: database file/directory creation and table DDL.

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Table holding all AAS records.
pub const SHELL_TABLE: &str = "asset_administration_shell";

/// Ensure the directory holding the SQLite file in `database_url` exists;
/// create it if not. In-memory URLs are left alone. Call before connecting.
pub fn ensure_database_dir(database_url: &str) -> Result<(), AppError> {
    let Some(path) = file_path_from_url(database_url) else {
        return Ok(());
    };
    if let Some(parent) = Path::new(&path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::BadRequest(format!("create database dir: {}", e)))?;
        }
    }
    Ok(())
}

/// Connect a pool to `database_url`, creating the database file on first run.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Create the AAS table if it does not exist. VARCHAR lengths document the
/// intended limits; SQLite does not enforce them. Uniqueness of `aas_id` and
/// `id_short` is enforced here, backing the handlers' advisory checks.
pub async fn ensure_shell_table(pool: &SqlitePool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            pk_aas INTEGER PRIMARY KEY,
            aas_id VARCHAR(2000) NOT NULL UNIQUE,
            id_short VARCHAR(128) NOT NULL UNIQUE,
            asset_kind VARCHAR(16) NOT NULL,
            global_asset_id VARCHAR(2000) NOT NULL,
            version VARCHAR(4),
            revision VARCHAR(4),
            description VARCHAR(1023),
            creation_date DATETIME NOT NULL
        )
        "#,
        SHELL_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Extract the filesystem path from a `sqlite:`/`sqlite://` URL. Returns
/// None for in-memory databases.
fn file_path_from_url(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    let path = rest.split('?').next().unwrap_or("");
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(path.to_string())
}
