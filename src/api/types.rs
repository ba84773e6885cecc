//! Shared state for the API router.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::db::{open_database, DatabaseError};

/// Shared context for all API routes.
///
/// Handlers open a short-lived connection per request; SQLite's own
/// locking governs concurrent writers, with no pooling on top.
#[derive(Clone)]
pub struct ApiContext {
    database_path: Arc<PathBuf>,
}

impl ApiContext {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path: Arc::new(database_path),
        }
    }

    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        open_database(&self.database_path)
    }
}
