//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;

/// Shared application state.
///
/// Generic over `D: Database` so any storage backend can be injected.
/// The database is created by the caller and passed in; the state never
/// opens or closes it.
pub struct AppState<D: Database> {
    db: Arc<D>,
}

// Manual Clone impl - we only need Arc to be cloneable, not D
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

impl<D: Database> AppState<D> {
    /// Create a new AppState that takes ownership of the database.
    pub fn new(db: D) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Create a new AppState sharing an existing database handle.
    pub fn from_arc(db: Arc<D>) -> Self {
        Self { db }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }
}
