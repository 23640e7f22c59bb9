//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod appointment;
mod connection;
mod helpers;


pub use appointment::SqliteAppointmentRepository;
pub use connection::SqliteDatabase;
