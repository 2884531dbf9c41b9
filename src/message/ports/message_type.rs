//! Message type port shared by every concrete message record.
//!
//! A concrete type declares its discriminator, its resolved schema
//! descriptor, how to build itself from checked attributes, and how to read
//! its fields back by internal name. Construction from JSON, serialisation
//! and factory registration are provided on top of that.

use crate::message::{
    domain::{Envelope, Message},
    error::MessageResult,
    registry::MessageRegistry,
    schema::{Attributes, SchemaDescriptor},
};
use serde_json::Value;

/// Configuration for message construction.
///
/// # Examples
///
/// ```
/// use domain_messages::message::ports::message_type::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert!(config.enforce_type_check);
/// assert!(!config.reject_unknown_attributes);
///
/// let lenient = ValidationConfig::lenient();
/// assert!(!lenient.enforce_type_check);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Whether type-checked message types compare the `Type` attribute with
    /// their discriminator.
    pub enforce_type_check: bool,
    /// Whether attributes not declared in the schema are rejected.
    pub reject_unknown_attributes: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enforce_type_check: true,
            reject_unknown_attributes: false,
        }
    }
}

impl ValidationConfig {
    /// Creates a lenient configuration that skips discriminator checks.
    ///
    /// Useful when a payload is deliberately read as a different type.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            enforce_type_check: false,
            ..Default::default()
        }
    }

    /// Creates a strict configuration that also rejects undeclared
    /// attributes.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            enforce_type_check: true,
            reject_unknown_attributes: true,
        }
    }
}

/// Port implemented by every concrete message record.
pub trait MessageType: Sized {
    /// The `Type` discriminator of this message type.
    const MESSAGE_TYPE: &'static str;

    /// Whether the `Type` attribute must equal [`Self::MESSAGE_TYPE`].
    const TYPE_CHECK: bool;

    /// Returns the fully resolved schema descriptor.
    fn schema() -> &'static SchemaDescriptor;

    /// Returns the envelope fields.
    fn envelope(&self) -> &Envelope;

    /// Builds the record from attributes already checked against
    /// [`Self::schema`].
    ///
    /// # Errors
    ///
    /// Returns the error of the first field that fails validation.
    fn from_attributes(envelope: Envelope, attributes: &Attributes<'_>) -> MessageResult<Self>;

    /// Returns the wire value of a type specific field by internal name, or
    /// `None` when the name is unknown or the field holds no value.
    fn attribute_value(&self, internal_name: &str) -> Option<Value>;

    /// Builds the record from a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the most specific error for the first failing check. The
    /// `Type` discriminator is checked before any other attribute.
    fn try_from_json_with(json: &Value, config: &ValidationConfig) -> MessageResult<Self> {
        let expected_type =
            (Self::TYPE_CHECK && config.enforce_type_check).then_some(Self::MESSAGE_TYPE);
        Envelope::check_discriminator(json, expected_type)?;
        let attributes = Self::schema().attributes(json, config)?;
        let envelope = Envelope::from_attributes(&attributes, expected_type)?;
        Self::from_attributes(envelope, &attributes)
    }

    /// Builds the record from a JSON payload using the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// See [`MessageType::try_from_json_with`].
    fn try_from_json(json: &Value) -> MessageResult<Self> {
        Self::try_from_json_with(json, &ValidationConfig::default())
    }

    /// Builds the record from a JSON payload, returning `None` when any
    /// check fails.
    fn from_json(json: &Value) -> Option<Self> {
        Self::try_from_json(json)
            .inspect_err(|error| {
                tracing::debug!(
                    message_type = Self::MESSAGE_TYPE,
                    %error,
                    "payload could not be built into a message"
                );
            })
            .ok()
    }

    /// Serialises the record to its JSON wire representation.
    fn to_json(&self) -> Value {
        Self::schema().serialize(|internal_name| {
            self.envelope()
                .attribute_value(internal_name)
                .or_else(|| self.attribute_value(internal_name))
        })
    }

    /// Registers this type's constructor with a registry.
    ///
    /// Returns `true` when the discriminator was not registered before.
    fn register_to_factory(registry: &MessageRegistry) -> bool
    where
        Self: Into<Message>,
    {
        registry.register_type::<Self>()
    }
}
