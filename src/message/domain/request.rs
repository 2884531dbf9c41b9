//! Regulation request sent by a grid operator to the flexibility market.

use super::{
    CustomerIdsInput, DateTimeInput, Direction, Envelope, QuantityBlock, QuantityInput,
    envelope::ABSTRACT_RESULT_MESSAGE_SCHEMA,
};
use crate::message::{
    error::MessageResult,
    ports::message_type::MessageType,
    schema::{Attributes, SchemaDeclarations, SchemaDescriptor},
    validation::rules::{self, QuantityRule},
};
use serde_json::{Value, json};
use std::sync::LazyLock;

const ACTIVATION_TIME: &str = "ActivationTime";
const DURATION: &str = "Duration";
const DIRECTION: &str = "Direction";
const REAL_POWER_MIN: &str = "RealPowerMin";
const REAL_POWER_REQUEST: &str = "RealPowerRequest";
const CUSTOMER_IDS: &str = "CustomerIds";
const CONGESTION_ID: &str = "CongestionId";
const BID_RESOLUTION: &str = "BidResolution";

const REQUEST: SchemaDeclarations = SchemaDeclarations {
    attributes: &[
        (ACTIVATION_TIME, "activation_time"),
        (DURATION, "duration"),
        (DIRECTION, "direction"),
        (REAL_POWER_MIN, "real_power_min"),
        (REAL_POWER_REQUEST, "real_power_request"),
        (CUSTOMER_IDS, "customer_ids"),
        (CONGESTION_ID, "congestion_id"),
        (BID_RESOLUTION, "bid_resolution"),
    ],
    optional: &[BID_RESOLUTION],
    quantities: &[
        (DURATION, "Minute"),
        (REAL_POWER_MIN, "kW"),
        (REAL_POWER_REQUEST, "kW"),
        (BID_RESOLUTION, "kW"),
    ],
    arrays: &[],
    time_series: &[],
};

static SCHEMA: LazyLock<SchemaDescriptor> =
    LazyLock::new(|| ABSTRACT_RESULT_MESSAGE_SCHEMA.extend(&REQUEST));

fn non_negative_rule(attribute: &'static str) -> MessageResult<QuantityRule> {
    Ok(SCHEMA.quantity_rule(attribute)?.with_check(rules::non_negative))
}

/// A request for flexible power to relieve a congestion.
///
/// `RealPowerMin` and `RealPowerRequest` are validated independently.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMessage {
    envelope: Envelope,
    activation_time: String,
    duration: QuantityBlock,
    direction: Direction,
    real_power_min: QuantityBlock,
    real_power_request: QuantityBlock,
    customer_ids: Vec<String>,
    congestion_id: String,
    bid_resolution: Option<QuantityBlock>,
}

impl RequestMessage {
    /// Returns the normalised activation time.
    #[must_use]
    pub fn activation_time(&self) -> &str {
        &self.activation_time
    }

    /// Returns the requested duration in minutes.
    #[must_use]
    pub const fn duration(&self) -> &QuantityBlock {
        &self.duration
    }

    /// Returns the regulation direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the minimum acceptable power.
    #[must_use]
    pub const fn real_power_min(&self) -> &QuantityBlock {
        &self.real_power_min
    }

    /// Returns the requested power.
    #[must_use]
    pub const fn real_power_request(&self) -> &QuantityBlock {
        &self.real_power_request
    }

    /// Returns the customers the request targets.
    #[must_use]
    pub fn customer_ids(&self) -> &[String] {
        &self.customer_ids
    }

    /// Returns the congestion identifier.
    #[must_use]
    pub fn congestion_id(&self) -> &str {
        &self.congestion_id
    }

    /// Returns the bid resolution, if set.
    #[must_use]
    pub const fn bid_resolution(&self) -> Option<&QuantityBlock> {
        self.bid_resolution.as_ref()
    }

    /// Sets the activation time.
    ///
    /// # Errors
    ///
    /// Returns a date error when the input is not ISO 8601.
    pub fn set_activation_time(&mut self, value: impl Into<DateTimeInput>) -> MessageResult<()> {
        self.activation_time = rules::datetime(value.into(), ACTIVATION_TIME)?;
        Ok(())
    }

    /// Sets the duration.
    ///
    /// # Errors
    ///
    /// Returns a unit value error for a unit other than `Minute` and a value
    /// error for a negative or non-numeric value.
    pub fn set_duration(&mut self, value: impl Into<QuantityInput>) -> MessageResult<()> {
        self.duration = rules::required_quantity(value.into(), &non_negative_rule(DURATION)?)?;
        Ok(())
    }

    /// Sets the direction from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns a value error for an unknown direction.
    pub fn set_direction(&mut self, value: &str) -> MessageResult<()> {
        self.direction = rules::direction(value, DIRECTION)?;
        Ok(())
    }

    /// Sets the minimum acceptable power.
    ///
    /// # Errors
    ///
    /// Returns a unit value error for a unit other than `kW` and a value
    /// error for a negative or non-numeric value.
    pub fn set_real_power_min(&mut self, value: impl Into<QuantityInput>) -> MessageResult<()> {
        self.real_power_min =
            rules::required_quantity(value.into(), &non_negative_rule(REAL_POWER_MIN)?)?;
        Ok(())
    }

    /// Sets the requested power.
    ///
    /// # Errors
    ///
    /// Returns a unit value error for a unit other than `kW` and a value
    /// error for a negative or non-numeric value.
    pub fn set_real_power_request(&mut self, value: impl Into<QuantityInput>) -> MessageResult<()> {
        self.real_power_request =
            rules::required_quantity(value.into(), &non_negative_rule(REAL_POWER_REQUEST)?)?;
        Ok(())
    }

    /// Sets the targeted customers.
    ///
    /// A single identifier is stored as a one element list.
    ///
    /// # Errors
    ///
    /// Returns a value error for a missing or empty input.
    pub fn set_customer_ids(&mut self, value: impl Into<CustomerIdsInput>) -> MessageResult<()> {
        self.customer_ids = rules::customer_ids(value.into(), CUSTOMER_IDS)?;
        Ok(())
    }

    /// Sets the congestion identifier. Any string is accepted.
    pub fn set_congestion_id(&mut self, value: impl Into<String>) {
        self.congestion_id = value.into();
    }

    /// Sets or clears the bid resolution.
    ///
    /// # Errors
    ///
    /// Returns a unit value error for a unit other than `kW` and a value
    /// error for a negative or non-numeric value.
    pub fn set_bid_resolution(&mut self, value: impl Into<QuantityInput>) -> MessageResult<()> {
        self.bid_resolution = rules::quantity(value.into(), &non_negative_rule(BID_RESOLUTION)?)?;
        Ok(())
    }
}

impl MessageType for RequestMessage {
    const MESSAGE_TYPE: &'static str = "Request";
    const TYPE_CHECK: bool = true;

    fn schema() -> &'static SchemaDescriptor {
        &SCHEMA
    }

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn from_attributes(envelope: Envelope, attributes: &Attributes<'_>) -> MessageResult<Self> {
        let quantity = |attribute: &'static str| -> MessageResult<Option<QuantityBlock>> {
            rules::quantity(
                QuantityInput::from_json(attributes.value(attribute))?,
                &non_negative_rule(attribute)?,
            )
        };
        let required = |attribute: &'static str| -> MessageResult<QuantityBlock> {
            rules::required_quantity(
                QuantityInput::from_json(attributes.value(attribute))?,
                &non_negative_rule(attribute)?,
            )
        };
        Ok(Self {
            envelope,
            activation_time: rules::datetime(
                DateTimeInput::from_json(attributes.value(ACTIVATION_TIME))?,
                ACTIVATION_TIME,
            )?,
            duration: required(DURATION)?,
            direction: rules::direction(attributes.text(DIRECTION)?, DIRECTION)?,
            real_power_min: required(REAL_POWER_MIN)?,
            real_power_request: required(REAL_POWER_REQUEST)?,
            customer_ids: rules::customer_ids(
                CustomerIdsInput::from_json(attributes.value(CUSTOMER_IDS))?,
                CUSTOMER_IDS,
            )?,
            congestion_id: attributes.text(CONGESTION_ID)?.to_owned(),
            bid_resolution: quantity(BID_RESOLUTION)?,
        })
    }

    fn attribute_value(&self, internal_name: &str) -> Option<Value> {
        match internal_name {
            "activation_time" => Some(json!(self.activation_time)),
            "duration" => Some(self.duration.to_json()),
            "direction" => Some(json!(self.direction)),
            "real_power_min" => Some(self.real_power_min.to_json()),
            "real_power_request" => Some(self.real_power_request.to_json()),
            "customer_ids" => Some(json!(self.customer_ids)),
            "congestion_id" => Some(json!(self.congestion_id)),
            "bid_resolution" => self.bid_resolution.as_ref().map(QuantityBlock::to_json),
            _ => None,
        }
    }
}
