//! Domain types for the message subsystem.
//!
//! Value blocks, the closed input unions accepted by field setters, the
//! shared envelope and the concrete message records.

mod array;
mod direction;
pub mod envelope;
mod inputs;
mod market_result;
mod message;
pub mod offer;
mod quantity;
pub mod resource_forecast;
mod request;
mod timeseries;

pub use array::{VALUES_KEY, ValueArrayBlock, ValueArrayInput};
pub use direction::{Direction, ParseDirectionError};
pub use envelope::Envelope;
pub use inputs::{CountInput, CustomerIdsInput, DateTimeInput};
pub use market_result::LfmMarketResultMessage;
pub use message::Message;
pub use offer::OfferMessage;
pub use quantity::{QuantityBlock, QuantityInput, UNIT_OF_MEASURE_KEY, VALUE_KEY};
pub use request::RequestMessage;
pub use resource_forecast::ResourceForecastPowerMessage;
pub use timeseries::{SERIES_KEY, TIME_INDEX_KEY, TimeSeriesBlock, TimeSeriesInput};
