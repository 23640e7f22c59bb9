//! Shared helper functions for SQLite repositories.

use sqlx::Row;
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};

use crate::db::{AgendaTable, Appointment, DbError, DbResult};

/// Classify a driver error.
///
/// Pool and transport faults mean the handle cannot be used at all; every
/// other failure happened while running a statement.
pub fn storage_error(err: sqlx::Error) -> DbError {
    match err {
        sqlx::Error::PoolClosed
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => DbError::StorageUnavailable {
            message: err.to_string(),
        },
        other => DbError::StorageExecutionFailed {
            message: other.to_string(),
        },
    }
}

/// Column list shared by every SELECT on an appointment table.
pub const APPOINTMENT_COLUMNS: &str =
    "id_agenda, nome_pessoa, contato_telefonico, email, data_agendamento";

/// `SELECT <columns> FROM <table>` for an allow-listed table.
pub fn select_from(table: AgendaTable) -> String {
    format!("SELECT {} FROM {}", APPOINTMENT_COLUMNS, table.as_str())
}

/// Map one result row to an [`Appointment`].
pub fn appointment_from_row(row: &SqliteRow) -> DbResult<Appointment> {
    Ok(Appointment {
        id: row.try_get("id_agenda").map_err(storage_error)?,
        person_name: row.try_get("nome_pessoa").map_err(storage_error)?,
        phone_contact: row.try_get("contato_telefonico").map_err(storage_error)?,
        email: row.try_get("email").map_err(storage_error)?,
        appointment_date: row.try_get("data_agendamento").map_err(storage_error)?,
    })
}

/// Map a full result set, collapsing "no rows" to `None`.
pub fn appointments_from_rows(rows: &[SqliteRow]) -> DbResult<Option<Vec<Appointment>>> {
    if rows.is_empty() {
        return Ok(None);
    }
    rows.iter()
        .map(appointment_from_row)
        .collect::<DbResult<Vec<_>>>()
        .map(Some)
}

/// Treat a mutation that touched no row as absence of the target.
///
/// The conditional statement is the existence check, so the row count is
/// decided at the moment the statement runs.
pub fn require_affected(result: SqliteQueryResult, id: i64) -> DbResult<u64> {
    match result.rows_affected() {
        0 => Err(DbError::NotFound {
            entity_type: "Appointment".to_string(),
            id: id.to_string(),
        }),
        n => Ok(n),
    }
}
