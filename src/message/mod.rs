//! Typed business messages for the simulation platform.
//!
//! Each message type declares its attributes once in a schema descriptor,
//! is built from an untyped JSON payload through validated field rules and
//! serialises back to the same wire shape.
//!
//! # Architecture
//!
//! - **Domain**: value blocks, the envelope and the concrete records
//!   ([`domain::OfferMessage`], [`domain::RequestMessage`],
//!   [`domain::ResourceForecastPowerMessage`],
//!   [`domain::LfmMarketResultMessage`])
//! - **Schema**: per type descriptors composed from their ancestors
//! - **Validation**: field rules shared by setters and JSON construction
//! - **Ports**: the [`ports::message_type::MessageType`] trait
//! - **Registry**: discriminator based dispatch ([`registry::MessageRegistry`])
//!
//! # Example
//!
//! ```
//! use domain_messages::message::domain::Message;
//! use domain_messages::message::registry::registry;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "Type": "ResourceForecast.Power",
//!     "SimulationId": "2020-01-01T00:00:00.000Z",
//!     "SourceProcessId": "Forecaster",
//!     "MessageId": "Forecaster-1",
//!     "Timestamp": "2020-01-01T00:00:10.000Z",
//!     "EpochNumber": 1,
//!     "TriggeringMessageIds": ["Manager-1"],
//!     "ResourceName": "Load1",
//!     "Forecast": {
//!         "TimeIndex": [
//!             "2020-01-01T01:00:00.000Z",
//!             "2020-01-01T02:00:00.000Z",
//!             "2020-01-01T03:00:00.000Z"
//!         ],
//!         "Series": {
//!             "RealPower": {"Values": [1.5, 2.0, 2.5], "UnitOfMeasure": "kW"}
//!         }
//!     }
//! });
//!
//! let message = registry().build(&payload).expect("valid forecast");
//! assert!(matches!(message, Message::ResourceForecastPower(_)));
//! assert_eq!(message.to_json(), payload);
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod registry;
pub mod schema;
pub mod validation;

#[cfg(test)]
mod tests;
