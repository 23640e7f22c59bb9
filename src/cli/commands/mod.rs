pub mod api;
pub mod appointment;
