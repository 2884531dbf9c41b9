//! Closed union of every concrete message type.

use super::{
    Envelope, LfmMarketResultMessage, OfferMessage, RequestMessage, ResourceForecastPowerMessage,
};
use crate::message::ports::message_type::MessageType;
use serde_json::Value;

/// A message built by the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A regulation offer.
    Offer(OfferMessage),
    /// A regulation request.
    Request(RequestMessage),
    /// A resource power forecast.
    ResourceForecastPower(ResourceForecastPowerMessage),
    /// A local flexibility market result.
    LfmMarketResult(LfmMarketResultMessage),
}

impl Message {
    /// Returns the `Type` discriminator of the wrapped message.
    #[must_use]
    pub const fn message_type(&self) -> &'static str {
        match self {
            Self::Offer(_) => OfferMessage::MESSAGE_TYPE,
            Self::Request(_) => RequestMessage::MESSAGE_TYPE,
            Self::ResourceForecastPower(_) => ResourceForecastPowerMessage::MESSAGE_TYPE,
            Self::LfmMarketResult(_) => LfmMarketResultMessage::MESSAGE_TYPE,
        }
    }

    /// Returns the envelope of the wrapped message.
    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        match self {
            Self::Offer(message) => message.envelope(),
            Self::Request(message) => message.envelope(),
            Self::ResourceForecastPower(message) => message.envelope(),
            Self::LfmMarketResult(message) => message.envelope(),
        }
    }

    /// Serialises the wrapped message.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Offer(message) => message.to_json(),
            Self::Request(message) => message.to_json(),
            Self::ResourceForecastPower(message) => message.to_json(),
            Self::LfmMarketResult(message) => message.to_json(),
        }
    }
}

impl From<OfferMessage> for Message {
    fn from(message: OfferMessage) -> Self {
        Self::Offer(message)
    }
}

impl From<RequestMessage> for Message {
    fn from(message: RequestMessage) -> Self {
        Self::Request(message)
    }
}

impl From<ResourceForecastPowerMessage> for Message {
    fn from(message: ResourceForecastPowerMessage) -> Self {
        Self::ResourceForecastPower(message)
    }
}

impl From<LfmMarketResultMessage> for Message {
    fn from(message: LfmMarketResultMessage) -> Self {
        Self::LfmMarketResult(message)
    }
}
