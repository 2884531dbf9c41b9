//! Value arrays: ordered numbers sharing one unit of measure.

use crate::message::error::{BlockFault, MessageError, MessageResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire name of the values of an array block.
pub const VALUES_KEY: &str = "Values";

/// An ordered sequence of finite numbers sharing one unit of measure.
///
/// # Wire format
///
/// ```json
/// { "Values": [1.0, 2.5], "UnitOfMeasure": "kW" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValueArrayBlock {
    values: Vec<f64>,
    unit_of_measure: String,
}

impl ValueArrayBlock {
    /// Creates an array block.
    ///
    /// # Errors
    ///
    /// Returns a block error when a value is not finite or the unit is empty.
    pub fn new(values: Vec<f64>, unit_of_measure: impl Into<String>) -> MessageResult<Self> {
        Self::checked(values, unit_of_measure.into()).map_err(MessageError::from)
    }

    /// Parses an array block from its `{Values, UnitOfMeasure}` object form.
    ///
    /// # Errors
    ///
    /// Returns a block error when the object is malformed or a value is not
    /// a number.
    pub fn from_json(json: &Value) -> MessageResult<Self> {
        Self::parse(json).map_err(MessageError::from)
    }

    fn checked(values: Vec<f64>, unit_of_measure: String) -> Result<Self, BlockFault> {
        if unit_of_measure.trim().is_empty() {
            return Err(BlockFault::Shape(
                "array unit of measure must not be empty".to_owned(),
            ));
        }
        if let Some(value) = values.iter().find(|value| !value.is_finite()) {
            return Err(BlockFault::Shape(format!(
                "array value '{value}' is not a finite number"
            )));
        }
        Ok(Self {
            values,
            unit_of_measure,
        })
    }

    pub(crate) fn parse(json: &Value) -> Result<Self, BlockFault> {
        if !json.is_object() {
            return Err(BlockFault::Shape(format!("'{json}' is not an array block")));
        }
        let raw = RawValueArrayBlock::deserialize(json)
            .map_err(|error| BlockFault::Shape(format!("'{json}' is not an array block: {error}")))?;
        Self::checked(raw.values, raw.unit_of_measure)
    }

    /// Returns the values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the unit of measure shared by all values.
    #[must_use]
    pub fn unit_of_measure(&self) -> &str {
        &self.unit_of_measure
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the array holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the `{Values, UnitOfMeasure}` wire representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Wire shape of an array block before validation.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawValueArrayBlock {
    values: Vec<f64>,
    unit_of_measure: String,
}

/// Shapes accepted when assigning an array-typed field.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueArrayInput {
    /// No value was given.
    Missing,
    /// An untyped JSON value still to be parsed.
    Raw(Value),
    /// An already constructed block.
    Block(ValueArrayBlock),
}

impl From<ValueArrayBlock> for ValueArrayInput {
    fn from(value: ValueArrayBlock) -> Self {
        Self::Block(value)
    }
}

impl From<&Value> for ValueArrayInput {
    fn from(value: &Value) -> Self {
        if value.is_null() {
            Self::Missing
        } else {
            Self::Raw(value.clone())
        }
    }
}
