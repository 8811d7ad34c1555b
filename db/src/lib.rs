pub mod models;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use util::config;

/// Turns `DATABASE_PATH` into a connection URL.
///
/// DSNs are used as-is; anything else is a SQLite file path whose parent
/// directory is created on demand.
pub fn database_url(path_or_url: &str) -> String {
    if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        return path_or_url.to_owned();
    }

    if let Some(parent) = Path::new(path_or_url).parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
    format!("sqlite://{path_or_url}?mode=rwc")
}

/// Connects to the configured database.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url(&config::database_path())).await
}
