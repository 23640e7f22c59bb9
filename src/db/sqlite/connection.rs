//! SQLite database connection and migration management.

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use super::appointment::SqliteAppointmentRepository;
use super::helpers::storage_error;
use crate::db::{AgendaTable, Database, DbError, DbResult};

// Embed migrations from data/sql/sqlite/ at compile time
static MIGRATOR: Migrator = sqlx::migrate!("./data/sql/sqlite");

/// SQLite database implementation.
///
/// Owns the connection pool. Repositories borrow it per call, so the pool
/// can be shared behind an `Arc` and closed explicitly at shutdown.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a database at the given path, creating the file if missing.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| DbError::StorageUnavailable {
                message: format!("Failed to open {}: {}", path.display(), e),
            })?;

        info!(path = %path.display(), "Opened SQLite database");
        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// The pool holds exactly one connection for its whole life; a second
    /// connection would see a different, empty database.
    pub async fn in_memory() -> DbResult<Self> {
        let options: SqliteConnectOptions =
            "sqlite::memory:"
                .parse()
                .map_err(|e: sqlx::Error| DbError::StorageUnavailable {
                    message: e.to_string(),
                })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(storage_error)?;

        debug!("Opened in-memory SQLite database");
        Ok(Self { pool })
    }

    /// Direct pool access for tests and advanced operations.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    ///
    /// Any operation issued afterwards fails with `StorageUnavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed SQLite database");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

impl Database for SqliteDatabase {
    type Appointments<'a> = SqliteAppointmentRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;

        debug!("Database migrations applied");
        Ok(())
    }

    fn appointments(&self, table: AgendaTable) -> Self::Appointments<'_> {
        SqliteAppointmentRepository {
            pool: &self.pool,
            table,
        }
    }
}
