//! API server command

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{self, Config};
use crate::cli::error::{CliError, CliResult};
use crate::db::{Database, SqliteDatabase};
use crate::paths::get_db_path;

/// Resolve the database path: explicit flag, else `AGENDA_DB`, else XDG default.
pub fn resolve_db_path(db: Option<PathBuf>) -> PathBuf {
    db.unwrap_or_else(get_db_path)
}

/// Open the database at `db_path`, creating its parent directory, and apply the schema.
pub async fn open_database(db_path: &Path) -> CliResult<SqliteDatabase> {
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| CliError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let db = SqliteDatabase::open(db_path).await?;
    db.migrate().await?;
    Ok(db)
}

/// Run the API server
pub async fn run(
    host: IpAddr,
    port: u16,
    db: Option<PathBuf>,
    verbosity: u8,
    enable_docs: bool,
) -> CliResult<()> {
    let db_path = resolve_db_path(db);

    println!("Opening database at {:?}", db_path);
    let db = Arc::new(open_database(&db_path).await?);
    println!("Database migrations complete");

    // Banner goes out before logging is initialized
    println!();
    println!("🚀 agenda API server starting...");
    println!("   API:      http://{}:{}/api/v1/agenda", host, port);
    if enable_docs {
        println!("   Docs:     http://{}:{}/docs", host, port);
    }
    println!();
    println!("   Database: {}", db_path.display());
    println!();

    let served = api::run(
        Config {
            host,
            port,
            verbosity,
            enable_docs,
        },
        Arc::clone(&db),
    )
    .await;

    db.close().await;
    served?;

    Ok(())
}
