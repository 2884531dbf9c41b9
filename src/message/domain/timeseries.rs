//! Time series blocks: timestamps paired with named value arrays.

use super::array::ValueArrayBlock;
use crate::message::{
    error::{BlockFault, MessageError, MessageResult},
    validation::datetime,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Wire name of the time index of a time series block.
pub const TIME_INDEX_KEY: &str = "TimeIndex";

/// Wire name of the named series of a time series block.
pub const SERIES_KEY: &str = "Series";

/// Timestamps paired position by position with one or more named arrays.
///
/// # Invariants
///
/// - every time index entry is a canonical ISO 8601 UTC timestamp
/// - every series has exactly as many values as the time index
///
/// Ordering of the time index is not checked.
///
/// # Wire format
///
/// ```json
/// {
///   "TimeIndex": ["2020-06-03T04:00:00.000Z", "2020-06-03T05:00:00.000Z"],
///   "Series": { "RealPower": { "Values": [2.0, 3.0], "UnitOfMeasure": "kW" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSeriesBlock {
    time_index: Vec<String>,
    series: BTreeMap<String, ValueArrayBlock>,
}

impl TimeSeriesBlock {
    /// Creates a time series block, normalising the time index.
    ///
    /// # Errors
    ///
    /// Returns a date error for an unparseable timestamp and a block error
    /// when a series length differs from the time index length.
    pub fn new<I, S>(time_index: I, series: BTreeMap<String, ValueArrayBlock>) -> MessageResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::checked(time_index, series).map_err(MessageError::from)
    }

    /// Parses a time series block from its `{TimeIndex, Series}` object form.
    ///
    /// # Errors
    ///
    /// Returns a block error for malformed objects, plus any error raised by
    /// [`TimeSeriesBlock::new`].
    pub fn from_json(json: &Value) -> MessageResult<Self> {
        Self::parse(json).map_err(MessageError::from)
    }

    fn checked<I, S>(
        time_index: I,
        series: BTreeMap<String, ValueArrayBlock>,
    ) -> Result<Self, BlockFault>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = time_index
            .into_iter()
            .map(|timestamp| {
                let raw = timestamp.as_ref();
                datetime::normalize_datetime(raw).ok_or_else(|| {
                    BlockFault::Date(format!("'{raw}' is an invalid time index entry"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some((name, values)) = series
            .iter()
            .find(|(_, values)| values.len() != normalized.len())
        {
            return Err(BlockFault::Shape(format!(
                "series '{name}' has {} values but the time index has {} entries",
                values.len(),
                normalized.len()
            )));
        }

        Ok(Self {
            time_index: normalized,
            series,
        })
    }

    pub(crate) fn parse(json: &Value) -> Result<Self, BlockFault> {
        if !json.is_object() {
            return Err(BlockFault::Shape(format!("'{json}' is not a time series block")));
        }
        let raw = RawTimeSeriesBlock::deserialize(json).map_err(|error| {
            BlockFault::Shape(format!("'{json}' is not a time series block: {error}"))
        })?;
        let series = raw
            .series
            .into_iter()
            .map(|(name, values)| Ok((name, ValueArrayBlock::parse(&values)?)))
            .collect::<Result<BTreeMap<_, _>, BlockFault>>()?;
        Self::checked(raw.time_index, series)
    }

    /// Returns the normalised time index.
    #[must_use]
    pub fn time_index(&self) -> &[String] {
        &self.time_index
    }

    /// Returns the named series.
    #[must_use]
    pub const fn series(&self) -> &BTreeMap<String, ValueArrayBlock> {
        &self.series
    }

    /// Returns the series with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValueArrayBlock> {
        self.series.get(name)
    }

    /// Returns the `{TimeIndex, Series}` wire representation.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Wire shape of a time series block before validation.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTimeSeriesBlock {
    time_index: Vec<String>,
    series: BTreeMap<String, Value>,
}

/// Shapes accepted when assigning a time series field.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSeriesInput {
    /// No value was given.
    Missing,
    /// An untyped JSON value still to be parsed.
    Raw(Value),
    /// An already constructed block.
    Block(TimeSeriesBlock),
}

impl From<TimeSeriesBlock> for TimeSeriesInput {
    fn from(value: TimeSeriesBlock) -> Self {
        Self::Block(value)
    }
}

impl From<&Value> for TimeSeriesInput {
    fn from(value: &Value) -> Self {
        if value.is_null() {
            Self::Missing
        } else {
            Self::Raw(value.clone())
        }
    }
}

impl From<Value> for TimeSeriesInput {
    fn from(value: Value) -> Self {
        if value.is_null() {
            Self::Missing
        } else {
            Self::Raw(value)
        }
    }
}
