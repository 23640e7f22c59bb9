//! V1 API handlers.

mod appointments;

#[cfg(test)]
mod appointments_test;

pub use appointments::*;
