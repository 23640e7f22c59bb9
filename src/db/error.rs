//! Database error types.
//!
//! This module provides the error taxonomy for appointment operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! Caller-input faults (`InvalidInput`, `NotFound`) are kept apart from
//! storage faults so the boundary can map them to different responses.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Invalid input: {message}")]
    #[diagnostic(code(agenda::db::invalid_input))]
    InvalidInput { message: String },

    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(agenda::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Storage unavailable: {message}")]
    #[diagnostic(
        code(agenda::db::storage_unavailable),
        help("Check that the database file is reachable and the pool has not been closed.")
    )]
    StorageUnavailable { message: String },

    #[error("Storage execution failed: {message}")]
    #[diagnostic(code(agenda::db::storage_execution_failed))]
    StorageExecutionFailed { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(agenda::db::migration_error))]
    Migration { message: String },
}

impl DbError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        DbError::InvalidInput {
            message: message.into(),
        }
    }

    /// True for faults attributable to the caller's arguments.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, DbError::InvalidInput { .. } | DbError::NotFound { .. })
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
