//! Quantity values: a number bound to a unit of measure.

use crate::message::error::{BlockFault, MessageError, MessageResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Wire name of the numeric part of a quantity or array block.
pub const VALUE_KEY: &str = "Value";

/// Wire name of the unit of measure of a quantity or array block.
pub const UNIT_OF_MEASURE_KEY: &str = "UnitOfMeasure";

/// A finite numeric value paired with a unit of measure.
///
/// # Wire format
///
/// ```json
/// { "Value": 15.0, "UnitOfMeasure": "Minute" }
/// ```
///
/// # Examples
///
/// ```
/// use domain_messages::message::domain::QuantityBlock;
///
/// let duration = QuantityBlock::new(15.0, "Minute").expect("valid quantity");
/// assert_eq!(duration.unit_of_measure(), "Minute");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuantityBlock {
    value: f64,
    unit_of_measure: String,
}

impl QuantityBlock {
    /// Creates a quantity block.
    ///
    /// # Errors
    ///
    /// Returns a block error when the value is not finite or the unit is
    /// empty.
    pub fn new(value: f64, unit_of_measure: impl Into<String>) -> MessageResult<Self> {
        Self::checked(value, unit_of_measure.into()).map_err(MessageError::from)
    }

    /// Parses a quantity block from its `{Value, UnitOfMeasure}` object form.
    ///
    /// The value may be given as a number or a numeric string.
    ///
    /// # Errors
    ///
    /// Returns a block error when the object is malformed.
    pub fn from_json(json: &Value) -> MessageResult<Self> {
        Self::parse(json).map_err(MessageError::from)
    }

    pub(crate) fn checked(value: f64, unit_of_measure: String) -> Result<Self, BlockFault> {
        if !value.is_finite() {
            return Err(BlockFault::Shape(format!(
                "quantity value '{value}' is not a finite number"
            )));
        }
        if unit_of_measure.trim().is_empty() {
            return Err(BlockFault::Shape(
                "quantity unit of measure must not be empty".to_owned(),
            ));
        }
        Ok(Self {
            value,
            unit_of_measure,
        })
    }

    pub(crate) fn parse(json: &Value) -> Result<Self, BlockFault> {
        if !json.is_object() {
            return Err(BlockFault::Shape(format!("'{json}' is not a quantity block")));
        }
        let raw = RawQuantityBlock::deserialize(json)
            .map_err(|error| BlockFault::Shape(format!("'{json}' is not a quantity block: {error}")))?;
        let value = raw
            .value
            .as_f64()
            .ok_or_else(|| BlockFault::Shape(format!("'{json}' has no numeric {VALUE_KEY}")))?;
        Self::checked(value, raw.unit_of_measure)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Returns the unit of measure.
    #[must_use]
    pub fn unit_of_measure(&self) -> &str {
        &self.unit_of_measure
    }

    /// Returns the `{Value, UnitOfMeasure}` wire representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Wire shape of a quantity block before validation.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawQuantityBlock {
    value: RawNumber,
    unit_of_measure: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for QuantityBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit_of_measure)
    }
}

/// Shapes accepted when assigning a quantity-typed field.
///
/// Bare numbers and numeric strings take the field's default unit; a block
/// keeps its own unit, which must be accepted by the field.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityInput {
    /// No value was given.
    Missing,
    /// A bare number.
    Number(f64),
    /// A string expected to hold a number.
    Text(String),
    /// A quantity with an explicit unit.
    Block(QuantityBlock),
}

impl QuantityInput {
    /// Classifies a JSON value as a quantity input.
    ///
    /// # Errors
    ///
    /// Returns a value error for booleans and arrays, and a block error for
    /// objects that are not well-formed quantity blocks.
    pub fn from_json(json: &Value) -> MessageResult<Self> {
        match json {
            Value::Null => Ok(Self::Missing),
            Value::Number(number) => number
                .as_f64()
                .map(Self::Number)
                .ok_or_else(|| MessageError::value(format!("'{number}' is not a valid number"))),
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Object(_) => QuantityBlock::from_json(json).map(Self::Block),
            Value::Bool(_) | Value::Array(_) => Err(MessageError::value(format!(
                "'{json}' is not a valid quantity"
            ))),
        }
    }
}

impl From<f64> for QuantityInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for QuantityInput {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for QuantityInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for QuantityInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<QuantityBlock> for QuantityInput {
    fn from(value: QuantityBlock) -> Self {
        Self::Block(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for QuantityInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}
