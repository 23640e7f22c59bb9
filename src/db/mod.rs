//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for appointment data access,
//! allowing different storage backends to be swapped without changing
//! business logic.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Appointment, AgendaTable, inputs and outcomes)
//! - `repository`: Trait definitions for data access
//! - `validation`: Input checks and date normalization
//! - `sqlite`: SQLite implementation

mod error;
mod models;
mod repository;
pub mod sqlite;
pub mod validation;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
