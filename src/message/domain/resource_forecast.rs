//! Power forecast published for a single resource.

use super::{Envelope, TimeSeriesBlock, TimeSeriesInput, envelope::ABSTRACT_RESULT_MESSAGE_SCHEMA};
use crate::message::{
    error::MessageResult,
    ports::message_type::MessageType,
    schema::{Attributes, SchemaDeclarations, SchemaDescriptor},
    validation::rules::{self, TimeSeriesRule},
};
use serde_json::{Value, json};
use std::sync::LazyLock;

const RESOURCE_NAME: &str = "ResourceName";
const FORECAST: &str = "Forecast";

/// Name of the only series a forecast carries.
pub const FORECAST_SERIES: &str = "RealPower";
/// Minimum number of forecast points.
pub const MIN_FORECAST_LENGTH: usize = 3;

const RESOURCE_FORECAST_POWER: SchemaDeclarations = SchemaDeclarations {
    attributes: &[(RESOURCE_NAME, "resource_name"), (FORECAST, "forecast")],
    optional: &[],
    quantities: &[],
    arrays: &[],
    time_series: &[FORECAST],
};

static SCHEMA: LazyLock<SchemaDescriptor> =
    LazyLock::new(|| ABSTRACT_RESULT_MESSAGE_SCHEMA.extend(&RESOURCE_FORECAST_POWER));

fn is_forecast_block(block: &TimeSeriesBlock) -> bool {
    block.time_index().len() >= MIN_FORECAST_LENGTH
        && block.series().len() == 1
        && block.get(FORECAST_SERIES).is_some_and(|series| {
            series.unit_of_measure() == "kW" && series.len() >= MIN_FORECAST_LENGTH
        })
}

fn forecast_rule() -> MessageResult<TimeSeriesRule> {
    Ok(SCHEMA.time_series_rule(FORECAST)?.with_check(is_forecast_block))
}

/// A real power forecast for one named resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceForecastPowerMessage {
    envelope: Envelope,
    resource_name: String,
    forecast: TimeSeriesBlock,
}

impl ResourceForecastPowerMessage {
    /// Returns the resource the forecast describes.
    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Returns the forecast block.
    #[must_use]
    pub const fn forecast(&self) -> &TimeSeriesBlock {
        &self.forecast
    }

    /// Sets the resource name.
    ///
    /// # Errors
    ///
    /// Returns a value error for an empty name.
    pub fn set_resource_name(&mut self, value: impl Into<String>) -> MessageResult<()> {
        self.resource_name = rules::non_empty(value, RESOURCE_NAME)?;
        Ok(())
    }

    /// Sets the forecast.
    ///
    /// # Errors
    ///
    /// Returns a value error unless the block holds a single `RealPower`
    /// series in `kW` with at least three points.
    pub fn set_forecast(&mut self, value: impl Into<TimeSeriesInput>) -> MessageResult<()> {
        self.forecast = rules::required_time_series(value.into(), &forecast_rule()?)?;
        Ok(())
    }
}

impl MessageType for ResourceForecastPowerMessage {
    const MESSAGE_TYPE: &'static str = "ResourceForecast.Power";
    const TYPE_CHECK: bool = true;

    fn schema() -> &'static SchemaDescriptor {
        &SCHEMA
    }

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn from_attributes(envelope: Envelope, attributes: &Attributes<'_>) -> MessageResult<Self> {
        Ok(Self {
            envelope,
            resource_name: rules::non_empty(attributes.text(RESOURCE_NAME)?, RESOURCE_NAME)?,
            forecast: rules::required_time_series(
                attributes.value(FORECAST).into(),
                &forecast_rule()?,
            )?,
        })
    }

    fn attribute_value(&self, internal_name: &str) -> Option<Value> {
        match internal_name {
            "resource_name" => Some(json!(self.resource_name)),
            "forecast" => Some(self.forecast.to_json()),
            _ => None,
        }
    }
}
