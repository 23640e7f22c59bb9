//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.

use std::future::Future;

use chrono::NaiveDate;

use crate::db::{
    DbResult,
    models::{AgendaTable, Appointment, AppointmentInput, CreatedAppointment, MutationOutcome},
};

/// Repository for Appointment operations, bound to one target table.
///
/// Read operations return `None` for "nothing matched"; only `update` and
/// `delete` report absence as [`crate::db::DbError::NotFound`].
pub trait AppointmentRepository: Send + Sync {
    /// Validate raw fields and insert a new appointment.
    fn create(
        &self,
        input: &AppointmentInput,
    ) -> impl Future<Output = DbResult<CreatedAppointment>> + Send;

    /// Get an appointment by ID.
    fn get(&self, id: i64) -> impl Future<Output = DbResult<Option<Appointment>>> + Send;

    /// Get the first appointment with exactly this person name.
    fn get_by_name(
        &self,
        person_name: &str,
    ) -> impl Future<Output = DbResult<Option<Appointment>>> + Send;

    /// Get appointments dated within `[start, end]`, ascending by date.
    fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = DbResult<Option<Vec<Appointment>>>> + Send;

    /// Get all appointments.
    fn list(&self) -> impl Future<Output = DbResult<Option<Vec<Appointment>>>> + Send;

    /// Validate raw fields and replace every mutable field of an appointment.
    fn update(
        &self,
        id: i64,
        input: &AppointmentInput,
    ) -> impl Future<Output = DbResult<MutationOutcome>> + Send;

    /// Delete an appointment by ID.
    fn delete(&self, id: i64) -> impl Future<Output = DbResult<MutationOutcome>> + Send;
}

/// Combined database interface.
///
/// The handle is injected into callers; its lifecycle (open, migrate,
/// close) is owned by whoever constructs it.
pub trait Database: Send + Sync {
    type Appointments<'a>: AppointmentRepository
    where
        Self: 'a;

    /// Apply the embedded schema.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the appointment repository for a target table.
    fn appointments(&self, table: AgendaTable) -> Self::Appointments<'_>;
}
