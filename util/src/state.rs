//! Application state container shared across Axum route handlers and services.
//!
//! Holds the shared resources every request needs: the SeaORM connection pool
//! and the media-storage client. Both are cheaply cloneable, so `AppState`
//! itself is passed by value through Axum's `State<T>` extractor.

use media::MediaStore;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    media: Arc<dyn MediaStore>,
}

impl AppState {
    /// Creates a new `AppState` from an established database connection and a
    /// constructed media store. The media store is injected here rather than
    /// configured globally, so tests can swap in a double.
    pub fn new(db: DatabaseConnection, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn media(&self) -> &Arc<dyn MediaStore> {
        &self.media
    }

    /// Cloned connection handle for tasks that need ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    pub fn media_clone(&self) -> Arc<dyn MediaStore> {
        self.media.clone()
    }
}
