//! Error taxonomy for message construction and validation.
//!
//! Every error is created through one of the named constructors on
//! [`MessageError`], which log the message with `tracing` at the point of
//! construction. Callers that recover from the error still leave a trace.

use std::fmt;
use thiserror::Error;

/// Result type for message operations.
pub type MessageResult<T> = Result<T, MessageError>;

/// Errors raised while building, validating, or updating messages.
///
/// The value-related variants form a family: [`MessageError::is_value_error`]
/// returns `true` for the general value error and all of its specialisations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The `Type` discriminator does not match the expected message type.
    #[error("message type error: {0}")]
    Type(String),

    /// A timestamp failed ISO 8601 validation or normalisation.
    #[error("message date error: {0}")]
    Date(String),

    /// An identifier failed its shape check.
    #[error("message id error: {0}")]
    Id(String),

    /// The message source is invalid.
    #[error("message source error: {0}")]
    Source(String),

    /// A value is out of range, malformed, or not an allowed enumeration.
    #[error("message value error: {0}")]
    Value(String),

    /// The epoch number is invalid.
    #[error("message epoch value error: {0}")]
    EpochValue(String),

    /// A simulation state value is invalid.
    #[error("message state value error: {0}")]
    StateValue(String),

    /// A quantity or array carries the wrong unit of measure.
    #[error("message unit value error: {0}")]
    UnitValue(String),

    /// A quantity, array, or time series block has an invalid shape.
    #[error("message block error: {0}")]
    Block(String),
}

/// Discriminant of a [`MessageError`], convenient for matching in callers
/// and tests without inspecting the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageErrorKind {
    /// See [`MessageError::Type`].
    Type,
    /// See [`MessageError::Date`].
    Date,
    /// See [`MessageError::Id`].
    Id,
    /// See [`MessageError::Source`].
    Source,
    /// See [`MessageError::Value`].
    Value,
    /// See [`MessageError::EpochValue`].
    EpochValue,
    /// See [`MessageError::StateValue`].
    StateValue,
    /// See [`MessageError::UnitValue`].
    UnitValue,
    /// See [`MessageError::Block`].
    Block,
}

impl fmt::Display for MessageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Type => "type",
            Self::Date => "date",
            Self::Id => "id",
            Self::Source => "source",
            Self::Value => "value",
            Self::EpochValue => "epoch_value",
            Self::StateValue => "state_value",
            Self::UnitValue => "unit_value",
            Self::Block => "block",
        };
        f.write_str(name)
    }
}

impl MessageError {
    /// Creates a type error.
    #[must_use]
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::Type(message.into()).logged()
    }

    /// Creates a date error.
    #[must_use]
    pub fn date(message: impl Into<String>) -> Self {
        Self::Date(message.into()).logged()
    }

    /// Creates an id error.
    #[must_use]
    pub fn id(message: impl Into<String>) -> Self {
        Self::Id(message.into()).logged()
    }

    /// Creates a source error.
    #[must_use]
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::Source(message.into()).logged()
    }

    /// Creates a general value error.
    #[must_use]
    pub fn value(message: impl Into<String>) -> Self {
        Self::Value(message.into()).logged()
    }

    /// Creates an epoch value error.
    #[must_use]
    pub fn epoch(message: impl Into<String>) -> Self {
        Self::EpochValue(message.into()).logged()
    }

    /// Creates a simulation state value error.
    #[must_use]
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateValue(message.into()).logged()
    }

    /// Creates a unit of measure error.
    #[must_use]
    pub fn unit(message: impl Into<String>) -> Self {
        Self::UnitValue(message.into()).logged()
    }

    /// Creates a block shape error.
    #[must_use]
    pub fn block(message: impl Into<String>) -> Self {
        Self::Block(message.into()).logged()
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> MessageErrorKind {
        match self {
            Self::Type(_) => MessageErrorKind::Type,
            Self::Date(_) => MessageErrorKind::Date,
            Self::Id(_) => MessageErrorKind::Id,
            Self::Source(_) => MessageErrorKind::Source,
            Self::Value(_) => MessageErrorKind::Value,
            Self::EpochValue(_) => MessageErrorKind::EpochValue,
            Self::StateValue(_) => MessageErrorKind::StateValue,
            Self::UnitValue(_) => MessageErrorKind::UnitValue,
            Self::Block(_) => MessageErrorKind::Block,
        }
    }

    /// Returns `true` for value errors and their specialisations
    /// (epoch, state and unit value errors).
    #[must_use]
    pub const fn is_value_error(&self) -> bool {
        matches!(
            self,
            Self::Value(_) | Self::EpochValue(_) | Self::StateValue(_) | Self::UnitValue(_)
        )
    }

    /// Returns the human-readable message without the kind prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Type(message)
            | Self::Date(message)
            | Self::Id(message)
            | Self::Source(message)
            | Self::Value(message)
            | Self::EpochValue(message)
            | Self::StateValue(message)
            | Self::UnitValue(message)
            | Self::Block(message) => message,
        }
    }

    fn logged(self) -> Self {
        tracing::error!(kind = %self.kind(), "{}", self.message());
        self
    }
}

/// Reason a quantity, array or time series block was rejected.
///
/// Faults are not logged. A block constructor turns one into a date or block
/// error, while a field rule reports it under the field's own error kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum BlockFault {
    /// A time index entry is not an ISO 8601 timestamp.
    #[error("{0}")]
    Date(String),

    /// The block is malformed or its parts disagree.
    #[error("{0}")]
    Shape(String),
}

impl From<BlockFault> for MessageError {
    fn from(fault: BlockFault) -> Self {
        match fault {
            BlockFault::Date(message) => Self::date(message),
            BlockFault::Shape(message) => Self::block(message),
        }
    }
}
