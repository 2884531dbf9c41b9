//! Domain messages: typed, validated messages for a simulation and
//! flexibility market platform.
//!
//! # Modules
//!
//! - [`message`]: message schemas, validation and the type registry

pub mod message;
