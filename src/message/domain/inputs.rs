//! Closed sets of input shapes accepted by scalar field setters.
//!
//! Each enum mirrors the shapes a JSON payload may carry for the field and
//! has a `from_json` classifier; validation lives in
//! [`crate::message::validation::rules`].

use crate::message::error::{MessageError, MessageResult};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Shapes accepted for a timestamp field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeInput {
    /// No value was given.
    Missing,
    /// A string expected to hold an ISO 8601 timestamp.
    Text(String),
    /// A typed UTC datetime.
    DateTime(DateTime<Utc>),
}

impl DateTimeInput {
    /// Classifies a JSON value as a timestamp input.
    ///
    /// # Errors
    ///
    /// Returns a date error for anything other than a string or `null`.
    pub fn from_json(json: &Value) -> MessageResult<Self> {
        match json {
            Value::Null => Ok(Self::Missing),
            Value::String(text) => Ok(Self::Text(text.clone())),
            _ => Err(MessageError::date(format!("'{json}' is not a timestamp string"))),
        }
    }
}

impl From<&str> for DateTimeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DateTimeInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for DateTimeInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for DateTimeInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Shapes accepted for a non-negative integer count.
#[derive(Debug, Clone, PartialEq)]
pub enum CountInput {
    /// No value was given.
    Missing,
    /// An integer.
    Integer(i64),
    /// A float, accepted only when integral.
    Float(f64),
    /// A string expected to hold a number.
    Text(String),
}

impl CountInput {
    /// Classifies a JSON value as a count input.
    ///
    /// # Errors
    ///
    /// Returns a value error for booleans, arrays and objects.
    pub fn from_json(json: &Value) -> MessageResult<Self> {
        Self::classify(json)
            .ok_or_else(|| MessageError::value(format!("'{json}' is not a valid count")))
    }

    pub(crate) fn classify(json: &Value) -> Option<Self> {
        match json {
            Value::Null => Some(Self::Missing),
            Value::Number(number) => Some(
                number
                    .as_i64()
                    .map_or_else(|| Self::Float(number.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            ),
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl From<i64> for CountInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for CountInput {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for CountInput {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for CountInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for CountInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CountInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for CountInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Shapes accepted for a list of customer identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerIdsInput {
    /// No value was given.
    Missing,
    /// A single identifier.
    Single(String),
    /// A sequence of identifiers.
    Many(Vec<String>),
}

impl CustomerIdsInput {
    /// Classifies a JSON value as a customer id input.
    ///
    /// # Errors
    ///
    /// Returns a value error when the value is neither a string nor a list of
    /// strings.
    pub fn from_json(json: &Value) -> MessageResult<Self> {
        match json {
            Value::Null => Ok(Self::Missing),
            Value::String(text) => Ok(Self::Single(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_owned).ok_or_else(|| {
                        MessageError::value(format!("customer id '{item}' is not a string"))
                    })
                })
                .collect::<MessageResult<Vec<_>>>()
                .map(Self::Many),
            Value::Bool(_) | Value::Number(_) | Value::Object(_) => Err(MessageError::value(
                format!("'{json}' is not a valid list of customer ids"),
            )),
        }
    }
}

impl From<&str> for CustomerIdsInput {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for CustomerIdsInput {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for CustomerIdsInput {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

impl From<Vec<&str>> for CustomerIdsInput {
    fn from(value: Vec<&str>) -> Self {
        Self::Many(value.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for CustomerIdsInput {
    fn from(value: &[&str]) -> Self {
        Self::Many(value.iter().map(|id| (*id).to_owned()).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for CustomerIdsInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}
