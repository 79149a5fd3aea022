pub mod models;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection};
use std::path::Path;
use util::config;

/// Opens the application database from `DATABASE_PATH`.
///
/// Accepts either a full DSN or a bare SQLite file path; for file paths the
/// parent directory is created first, since SQLite will not create
/// intermediate directories on its own.
pub async fn connect() -> DatabaseConnection {
    let path_or_url = config::database_path();
    let url = if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url
    } else {
        if let Some(parent) = Path::new(&path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}")
    };

    Database::connect(&url)
        .await
        .expect("Failed to connect to database")
}
