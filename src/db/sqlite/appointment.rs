//! SQLite AppointmentRepository implementation.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use super::helpers::{
    appointment_from_row, appointments_from_rows, require_affected, select_from, storage_error,
};
use crate::db::validation::{ensure_valid_id, ensure_valid_range, validate_appointment};
use crate::db::{
    AgendaTable, Appointment, AppointmentInput, AppointmentRepository, CreatedAppointment,
    DbResult, MutationOutcome,
};

/// SQLx-backed appointment repository bound to one table.
pub struct SqliteAppointmentRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
    pub(crate) table: AgendaTable,
}

impl SqliteAppointmentRepository<'_> {
    pub fn table(&self) -> AgendaTable {
        self.table
    }
}

impl<'a> AppointmentRepository for SqliteAppointmentRepository<'a> {
    async fn create(&self, input: &AppointmentInput) -> DbResult<CreatedAppointment> {
        let appointment = validate_appointment(input)?;

        let sql = format!(
            "INSERT INTO {} (nome_pessoa, contato_telefonico, email, data_agendamento) VALUES (?, ?, ?, ?)",
            self.table.as_str()
        );
        let result = sqlx::query(&sql)
            .bind(&appointment.person_name)
            .bind(&appointment.phone_contact)
            .bind(&appointment.email)
            .bind(appointment.appointment_date)
            .execute(self.pool)
            .await
            .map_err(storage_error)?;

        let id = result.last_insert_rowid();
        debug!(table = %self.table, id, "Created appointment");

        Ok(CreatedAppointment {
            id,
            message: "created".to_string(),
        })
    }

    async fn get(&self, id: i64) -> DbResult<Option<Appointment>> {
        let id = ensure_valid_id(id)?;

        let sql = format!("{} WHERE id_agenda = ?", select_from(self.table));
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(appointment_from_row).transpose()
    }

    async fn get_by_name(&self, person_name: &str) -> DbResult<Option<Appointment>> {
        let sql = format!(
            "{} WHERE nome_pessoa = ? ORDER BY id_agenda ASC LIMIT 1",
            select_from(self.table)
        );
        let row = sqlx::query(&sql)
            .bind(person_name)
            .fetch_optional(self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(appointment_from_row).transpose()
    }

    async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Option<Vec<Appointment>>> {
        ensure_valid_range(start, end)?;

        let sql = format!(
            "{} WHERE data_agendamento BETWEEN ? AND ? ORDER BY data_agendamento ASC, id_agenda ASC",
            select_from(self.table)
        );
        let rows = sqlx::query(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(self.pool)
            .await
            .map_err(storage_error)?;

        appointments_from_rows(&rows)
    }

    async fn list(&self) -> DbResult<Option<Vec<Appointment>>> {
        let sql = format!("{} ORDER BY id_agenda ASC", select_from(self.table));
        let rows = sqlx::query(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(storage_error)?;

        appointments_from_rows(&rows)
    }

    async fn update(&self, id: i64, input: &AppointmentInput) -> DbResult<MutationOutcome> {
        let id = ensure_valid_id(id)?;
        let appointment = validate_appointment(input)?;

        let sql = format!(
            "UPDATE {} SET nome_pessoa = ?, contato_telefonico = ?, email = ?, data_agendamento = ? WHERE id_agenda = ?",
            self.table.as_str()
        );
        let result = sqlx::query(&sql)
            .bind(&appointment.person_name)
            .bind(&appointment.phone_contact)
            .bind(&appointment.email)
            .bind(appointment.appointment_date)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(storage_error)?;

        let rows_affected = require_affected(result, id).inspect_err(|_| {
            warn!(table = %self.table, id, "Update matched no appointment");
        })?;

        Ok(MutationOutcome {
            message: "updated".to_string(),
            rows_affected,
        })
    }

    async fn delete(&self, id: i64) -> DbResult<MutationOutcome> {
        let id = ensure_valid_id(id)?;

        let sql = format!("DELETE FROM {} WHERE id_agenda = ?", self.table.as_str());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(storage_error)?;

        let rows_affected = require_affected(result, id).inspect_err(|_| {
            warn!(table = %self.table, id, "Delete matched no appointment");
        })?;

        Ok(MutationOutcome {
            message: "deleted".to_string(),
            rows_affected,
        })
    }
}
