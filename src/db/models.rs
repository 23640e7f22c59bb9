//! Domain models for the agenda database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::DbError;

// =============================================================================
// Target Table
// =============================================================================

/// Allow-listed appointment tables.
///
/// Every table shares the same schema. SQL is only ever built from
/// [`AgendaTable::as_str`], never from caller-supplied text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgendaTable {
    /// Production table.
    #[default]
    Agenda,
    /// Fixture table with an independent row set.
    AgendaTest,
}

impl AgendaTable {
    pub const ALL: [AgendaTable; 2] = [AgendaTable::Agenda, AgendaTable::AgendaTest];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgendaTable::Agenda => "agenda",
            AgendaTable::AgendaTest => "agenda_test",
        }
    }
}

impl fmt::Display for AgendaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgendaTable {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgendaTable::ALL
            .into_iter()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| DbError::InvalidInput {
                message: format!("unknown table '{}'; expected one of: agenda, agenda_test", s),
            })
    }
}

// =============================================================================
// Core Entity
// =============================================================================

/// A stored appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Storage-assigned primary key.
    pub id: i64,
    pub person_name: String,
    pub phone_contact: String,
    pub email: String,
    /// Calendar date, no time component.
    pub appointment_date: NaiveDate,
}

/// Loosely-typed appointment fields as received from a caller.
///
/// `appointment_date` is expected as `dd/MM/yyyy`. Nothing here is trusted
/// until it passes [`crate::db::validation::validate_appointment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentInput {
    pub person_name: Option<String>,
    pub phone_contact: Option<String>,
    pub email: Option<String>,
    pub appointment_date: Option<String>,
}

impl AppointmentInput {
    /// Build an input with every field present.
    pub fn new(
        person_name: impl Into<String>,
        phone_contact: impl Into<String>,
        email: impl Into<String>,
        appointment_date: impl Into<String>,
    ) -> Self {
        Self {
            person_name: Some(person_name.into()),
            phone_contact: Some(phone_contact.into()),
            email: Some(email.into()),
            appointment_date: Some(appointment_date.into()),
        }
    }
}

// =============================================================================
// Operation Results
// =============================================================================

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedAppointment {
    pub id: i64,
    pub message: String,
}

/// Result of a successful update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub message: String,
    pub rows_affected: u64,
}
