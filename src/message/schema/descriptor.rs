//! Per message type schema metadata and its composition.
//!
//! A concrete message type declares only its own attributes in a
//! [`SchemaDeclarations`] constant and extends its ancestor's
//! [`SchemaDescriptor`] with them once, at first use. The resulting
//! descriptor is never mutated afterwards.

use crate::message::{
    error::{MessageError, MessageResult},
    ports::message_type::ValidationConfig,
    validation::rules::{ArrayRule, QuantityRule, TimeSeriesRule},
};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Attribute declarations of a single message type, excluding ancestors.
///
/// All entries are `(wire name, value)` pairs or plain wire names.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaDeclarations {
    /// Wire name to internal field name.
    pub attributes: &'static [(&'static str, &'static str)],
    /// Wire names that may be absent or `null`.
    pub optional: &'static [&'static str],
    /// Quantity attributes and their expected unit of measure.
    pub quantities: &'static [(&'static str, &'static str)],
    /// Value array attributes and their expected unit of measure.
    pub arrays: &'static [(&'static str, &'static str)],
    /// Time series attributes.
    pub time_series: &'static [&'static str],
}

/// Fully resolved schema metadata for one message type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDescriptor {
    attribute_map: BTreeMap<&'static str, &'static str>,
    optional_attributes: BTreeSet<&'static str>,
    quantity_attributes: BTreeMap<&'static str, &'static str>,
    array_attributes: BTreeMap<&'static str, &'static str>,
    time_series_attributes: Vec<&'static str>,
}

impl SchemaDescriptor {
    /// Creates a descriptor without an ancestor.
    #[must_use]
    pub fn root(declarations: &SchemaDeclarations) -> Self {
        Self::default().extend(declarations)
    }

    /// Returns a new descriptor holding this descriptor's entries plus the
    /// given declarations.
    ///
    /// Declarations shadow ancestor entries with the same wire name.
    #[must_use]
    pub fn extend(&self, declarations: &SchemaDeclarations) -> Self {
        let mut merged = self.clone();
        merged
            .attribute_map
            .extend(declarations.attributes.iter().copied());
        merged
            .optional_attributes
            .extend(declarations.optional.iter().copied());
        merged
            .quantity_attributes
            .extend(declarations.quantities.iter().copied());
        merged
            .array_attributes
            .extend(declarations.arrays.iter().copied());
        for attribute in declarations.time_series {
            if !merged.time_series_attributes.contains(attribute) {
                merged.time_series_attributes.push(*attribute);
            }
        }
        merged
    }

    /// Returns the wire name to internal name mapping.
    #[must_use]
    pub const fn attribute_map(&self) -> &BTreeMap<&'static str, &'static str> {
        &self.attribute_map
    }

    /// Returns the internal field name for a wire name.
    #[must_use]
    pub fn internal_name(&self, attribute: &str) -> Option<&'static str> {
        self.attribute_map.get(attribute).copied()
    }

    /// Returns `true` when the attribute may be absent or `null`.
    #[must_use]
    pub fn is_optional(&self, attribute: &str) -> bool {
        self.optional_attributes.contains(attribute)
    }

    /// Returns the expected unit for a quantity attribute.
    #[must_use]
    pub fn quantity_unit(&self, attribute: &str) -> Option<&'static str> {
        self.quantity_attributes.get(attribute).copied()
    }

    /// Returns the expected unit for a value array attribute.
    #[must_use]
    pub fn array_unit(&self, attribute: &str) -> Option<&'static str> {
        self.array_attributes.get(attribute).copied()
    }

    /// Returns `true` when the attribute holds a time series block.
    #[must_use]
    pub fn is_time_series(&self, attribute: &str) -> bool {
        self.time_series_attributes
            .iter()
            .any(|candidate| *candidate == attribute)
    }

    /// Returns the time series attributes in declaration order.
    #[must_use]
    pub fn time_series_attributes(&self) -> &[&'static str] {
        &self.time_series_attributes
    }

    /// Returns the quantity rule for an attribute, with its unit and
    /// optionality taken from this descriptor.
    ///
    /// # Errors
    ///
    /// Returns a block error when the attribute is not a quantity attribute.
    pub fn quantity_rule(&self, attribute: &'static str) -> MessageResult<QuantityRule> {
        let unit = self.quantity_unit(attribute).ok_or_else(|| {
            MessageError::block(format!("'{attribute}' is not a quantity attribute"))
        })?;
        Ok(QuantityRule::new(attribute, unit).optional(self.is_optional(attribute)))
    }

    /// Returns the value array rule for an attribute.
    ///
    /// # Errors
    ///
    /// Returns a block error when the attribute is not an array attribute.
    pub fn array_rule(&self, attribute: &'static str) -> MessageResult<ArrayRule> {
        let unit = self.array_unit(attribute).ok_or_else(|| {
            MessageError::block(format!("'{attribute}' is not an array attribute"))
        })?;
        Ok(ArrayRule::new(attribute, unit).optional(self.is_optional(attribute)))
    }

    /// Returns the time series rule for an attribute.
    ///
    /// # Errors
    ///
    /// Returns a block error when the attribute is not a time series
    /// attribute.
    pub fn time_series_rule(&self, attribute: &'static str) -> MessageResult<TimeSeriesRule> {
        if !self.is_time_series(attribute) {
            return Err(MessageError::block(format!(
                "'{attribute}' is not a time series attribute"
            )));
        }
        Ok(TimeSeriesRule::new(attribute).optional(self.is_optional(attribute)))
    }

    /// Checks the shape of a JSON payload against this descriptor.
    ///
    /// # Errors
    ///
    /// Returns a value error when the payload is not an object, when a
    /// required attribute is absent or `null`, or when the configuration
    /// rejects unknown attributes and one is present.
    pub fn attributes<'a>(
        &self,
        json: &'a Value,
        config: &ValidationConfig,
    ) -> MessageResult<Attributes<'a>> {
        let object = json
            .as_object()
            .ok_or_else(|| MessageError::value("message payload must be a JSON object"))?;

        if let Some(missing) = self.attribute_map.keys().find(|attribute| {
            !self.is_optional(attribute) && object.get(**attribute).is_none_or(Value::is_null)
        }) {
            return Err(MessageError::value(format!(
                "required attribute '{missing}' is missing"
            )));
        }

        if config.reject_unknown_attributes
            && let Some(unknown) = object
                .keys()
                .find(|key| !self.attribute_map.contains_key(key.as_str()))
        {
            return Err(MessageError::value(format!(
                "attribute '{unknown}' is not part of this message type"
            )));
        }

        Ok(Attributes { object })
    }

    /// Serialises a message by looking up every declared attribute through
    /// its internal field name.
    ///
    /// Optional attributes without a value are omitted.
    pub fn serialize<F>(&self, mut lookup: F) -> Value
    where
        F: FnMut(&str) -> Option<Value>,
    {
        let object: Map<String, Value> = self
            .attribute_map
            .iter()
            .filter_map(|(attribute, internal)| match lookup(*internal) {
                Some(value) => Some(((*attribute).to_owned(), value)),
                None if self.is_optional(attribute) => None,
                None => Some(((*attribute).to_owned(), Value::Null)),
            })
            .collect();
        Value::Object(object)
    }
}

/// A JSON payload whose shape has been checked against a descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Attributes<'a> {
    object: &'a Map<String, Value>,
}

static NULL: Value = Value::Null;

impl<'a> Attributes<'a> {
    /// Returns the raw value of an attribute, or `null` when absent.
    #[must_use]
    pub fn value(&self, attribute: &str) -> &'a Value {
        self.object.get(attribute).unwrap_or(&NULL)
    }

    /// Returns the value of an attribute when present and not `null`.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&'a Value> {
        self.object.get(attribute).filter(|value| !value.is_null())
    }

    /// Returns the string value of an attribute.
    ///
    /// # Errors
    ///
    /// Returns a value error when the attribute is absent or not a string.
    pub fn text(&self, attribute: &str) -> MessageResult<&'a str> {
        self.value(attribute).as_str().ok_or_else(|| {
            MessageError::value(format!(
                "'{}' is an invalid value for {attribute}",
                self.value(attribute)
            ))
        })
    }

    /// Returns the string value of an optional attribute.
    ///
    /// # Errors
    ///
    /// Returns a value error when the attribute is present but not a string.
    pub fn optional_text(&self, attribute: &str) -> MessageResult<Option<&'a str>> {
        self.get(attribute).map(|_| self.text(attribute)).transpose()
    }
}
