//! Registry of message constructors keyed by discriminator.
//!
//! Transport and orchestration code hands an untyped payload to
//! [`MessageRegistry::build`], which dispatches on its `Type` attribute
//! without knowing the concrete message types in advance.

use crate::message::{
    domain::{
        LfmMarketResultMessage, Message, OfferMessage, RequestMessage,
        ResourceForecastPowerMessage, envelope::TYPE_ATTRIBUTE,
    },
    error::{MessageError, MessageResult},
    ports::message_type::{MessageType, ValidationConfig},
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

/// Builds a message from a payload under a configuration.
pub type MessageConstructor = fn(&Value, &ValidationConfig) -> MessageResult<Message>;

fn construct<T>(json: &Value, config: &ValidationConfig) -> MessageResult<Message>
where
    T: MessageType + Into<Message>,
{
    T::try_from_json_with(json, config).map(Into::into)
}

/// Thread-safe mapping from discriminator to constructor.
///
/// # Examples
///
/// ```
/// use domain_messages::message::registry::MessageRegistry;
/// use serde_json::json;
///
/// let registry = MessageRegistry::new();
/// assert!(registry.is_registered("Offer"));
/// assert!(registry.build(&json!({"Type": "Unknown"})).is_none());
/// ```
#[derive(Debug, Default)]
pub struct MessageRegistry {
    constructors: RwLock<HashMap<String, MessageConstructor>>,
    config: ValidationConfig,
}

impl MessageRegistry {
    /// Creates a registry holding every built-in message type.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in message type that builds
    /// messages under `config`.
    #[must_use]
    pub fn with_config(config: ValidationConfig) -> Self {
        let registry = Self {
            constructors: RwLock::default(),
            config,
        };
        OfferMessage::register_to_factory(&registry);
        RequestMessage::register_to_factory(&registry);
        ResourceForecastPowerMessage::register_to_factory(&registry);
        LfmMarketResultMessage::register_to_factory(&registry);
        registry
    }

    /// Returns the configuration used when building messages.
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Registers a constructor for a discriminator.
    ///
    /// Returns `true` when the discriminator was new. A discriminator that
    /// is already registered keeps its first constructor.
    pub fn register(&self, message_type: &str, constructor: MessageConstructor) -> bool {
        let mut constructors = self
            .constructors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if constructors.contains_key(message_type) {
            return false;
        }
        constructors.insert(message_type.to_owned(), constructor);
        true
    }

    /// Registers a message type under its own discriminator.
    pub fn register_type<T>(&self) -> bool
    where
        T: MessageType + Into<Message>,
    {
        self.register(T::MESSAGE_TYPE, construct::<T>)
    }

    /// Returns `true` if a constructor exists for the discriminator.
    #[must_use]
    pub fn is_registered(&self, message_type: &str) -> bool {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(message_type)
    }

    /// Returns the registered discriminators in sorted order.
    #[must_use]
    pub fn message_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        types.sort();
        types
    }

    /// Builds the message named by the payload's `Type` attribute.
    ///
    /// # Errors
    ///
    /// Returns a type error when the discriminator is missing or unknown,
    /// and the constructor's error when validation fails.
    pub fn try_build(&self, json: &Value) -> MessageResult<Message> {
        let message_type = json
            .get(TYPE_ATTRIBUTE)
            .and_then(Value::as_str)
            .ok_or_else(|| MessageError::type_mismatch("payload has no message type"))?;
        let constructor = self
            .constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(message_type)
            .copied();
        match constructor {
            Some(constructor) => constructor(json, &self.config),
            None => {
                tracing::warn!(message_type, "no constructor registered for message type");
                Err(MessageError::type_mismatch(format!(
                    "'{message_type}' is not a registered message type"
                )))
            }
        }
    }

    /// Builds the message named by the payload's `Type` attribute, or
    /// returns `None` when that is not possible.
    #[must_use]
    pub fn build(&self, json: &Value) -> Option<Message> {
        self.try_build(json)
            .inspect_err(|error| {
                tracing::debug!(%error, "payload could not be built into a message");
            })
            .ok()
    }
}

static REGISTRY: LazyLock<MessageRegistry> = LazyLock::new(MessageRegistry::new);

/// Returns the process-wide registry holding every built-in message type.
#[must_use]
pub fn registry() -> &'static MessageRegistry {
    &REGISTRY
}
