//! Input validation and normalization for appointments.
//!
//! Checks run in a fixed order and the first failure wins:
//! presence of all four fields, email shape, phone length, date.
//! Nothing in here touches storage.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::db::{AppointmentInput, DbError, DbResult};

/// Minimum number of characters in a phone contact.
pub const MIN_PHONE_LEN: usize = 10;

/// Format accepted from callers.
pub const INPUT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format used for persistence and range queries.
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static INPUT_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid input date regex"));
static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Appointment fields that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAppointment {
    pub person_name: String,
    pub phone_contact: String,
    pub email: String,
    pub appointment_date: NaiveDate,
}

/// Validate and normalize raw appointment fields.
pub fn validate_appointment(input: &AppointmentInput) -> DbResult<ValidAppointment> {
    let person_name = present(&input.person_name);
    let phone_contact = present(&input.phone_contact);
    let email = present(&input.email);
    let date_text = present(&input.appointment_date);

    let (Some(person_name), Some(phone_contact), Some(email), Some(date_text)) =
        (person_name, phone_contact, email, date_text)
    else {
        let missing: Vec<&str> = [
            ("person name", person_name.is_none()),
            ("phone contact", phone_contact.is_none()),
            ("email", email.is_none()),
            ("appointment date", date_text.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        return Err(DbError::invalid_input(format!(
            "all fields are required; missing: {}",
            missing.join(", ")
        )));
    };

    validate_email(email)?;
    validate_phone(phone_contact)?;
    let appointment_date = parse_input_date(date_text)?;

    Ok(ValidAppointment {
        person_name: person_name.to_string(),
        phone_contact: phone_contact.to_string(),
        email: email.to_string(),
        appointment_date,
    })
}

/// Trimmed value, or `None` when absent or blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn validate_email(email: &str) -> DbResult<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(DbError::invalid_input(format!(
            "invalid email '{}'; expected local@domain.tld",
            email
        )))
    }
}

pub fn validate_phone(phone: &str) -> DbResult<()> {
    if phone.chars().count() >= MIN_PHONE_LEN {
        Ok(())
    } else {
        Err(DbError::invalid_input(format!(
            "phone contact must have at least {} characters",
            MIN_PHONE_LEN
        )))
    }
}

/// Parse a caller-supplied `dd/MM/yyyy` date.
pub fn parse_input_date(text: &str) -> DbResult<NaiveDate> {
    let invalid = || {
        DbError::invalid_input(format!(
            "invalid appointment date '{}'; expected dd/MM/yyyy",
            text
        ))
    };

    if !INPUT_DATE_RE.is_match(text) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(text, INPUT_DATE_FORMAT).map_err(|_| invalid())
}

/// Parse a `yyyy-MM-dd` date, as used for range bounds.
pub fn parse_iso_date(text: &str) -> DbResult<NaiveDate> {
    let text = text.trim();
    let invalid =
        || DbError::invalid_input(format!("invalid date '{}'; expected yyyy-MM-dd", text));

    if !ISO_DATE_RE.is_match(text) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(text, STORAGE_DATE_FORMAT).map_err(|_| invalid())
}

/// Normalized storage representation of a date.
pub fn format_storage_date(date: NaiveDate) -> String {
    date.format(STORAGE_DATE_FORMAT).to_string()
}

/// Reject ids that cannot name a row.
pub fn ensure_valid_id(id: i64) -> DbResult<i64> {
    if id > 0 {
        Ok(id)
    } else {
        Err(DbError::invalid_input(format!(
            "invalid id '{}'; must be a positive number",
            id
        )))
    }
}

/// Parse a textual id coming from a path segment or CLI argument.
pub fn parse_id(raw: &str) -> DbResult<i64> {
    let id = raw.trim().parse::<i64>().map_err(|_| {
        DbError::invalid_input(format!("invalid id '{}'; must be a positive number", raw))
    })?;
    ensure_valid_id(id)
}

/// Check that a date range is well ordered.
pub fn ensure_valid_range(start: NaiveDate, end: NaiveDate) -> DbResult<()> {
    if start <= end {
        Ok(())
    } else {
        Err(DbError::invalid_input(format!(
            "invalid date range: start {} is after end {}",
            format_storage_date(start),
            format_storage_date(end)
        )))
    }
}
