//! Field validation for message construction.
//!
//! [`rules`] holds one pure function per field kind; [`datetime`] parses and
//! normalises ISO 8601 timestamps.

pub mod datetime;
pub mod rules;
