//! Unit tests for the message module.
//!
//! Tests are organised by message type, covering JSON construction,
//! setter validation and serialisation.

mod config_tests;
mod fixtures;
mod market_result_tests;
