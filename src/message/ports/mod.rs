//! Port definitions for the message subsystem.
//!
//! Every concrete message type implements [`message_type::MessageType`],
//! which supplies JSON construction, serialisation and factory
//! registration on top of its schema.

pub mod message_type;
