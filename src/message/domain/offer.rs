//! Regulation offer sent by a flexibility provider to the market.

use super::{
    CountInput, DateTimeInput, Direction, Envelope, QuantityBlock, QuantityInput, TimeSeriesBlock,
    TimeSeriesInput,
    envelope::ABSTRACT_RESULT_MESSAGE_SCHEMA,
};
use crate::message::{
    error::MessageResult,
    ports::message_type::MessageType,
    schema::{Attributes, SchemaDeclarations, SchemaDescriptor},
    validation::rules::{self, QuantityRule, TimeSeriesRule},
};
use serde_json::{Value, json};
use std::sync::LazyLock;

const ACTIVATION_TIME: &str = "ActivationTime";
const DURATION: &str = "Duration";
const DIRECTION: &str = "Direction";
const REAL_POWER: &str = "RealPower";
const PRICE: &str = "Price";
const CONGESTION_ID: &str = "CongestionId";
const OFFER_ID: &str = "OfferId";
const OFFER_COUNT: &str = "OfferCount";

/// Unit of a bare price.
pub const PRICE_UNIT: &str = "{EUR}/(kW.h)";
/// Additional unit accepted for explicit prices.
pub const PRICE_UNIT_MWH: &str = "{EUR}/(MW.h)";

const OFFER: SchemaDeclarations = SchemaDeclarations {
    attributes: &[
        (ACTIVATION_TIME, "activation_time"),
        (DURATION, "duration"),
        (DIRECTION, "direction"),
        (REAL_POWER, "real_power"),
        (PRICE, "price"),
        (CONGESTION_ID, "congestion_id"),
        (OFFER_ID, "offer_id"),
        (OFFER_COUNT, "offer_count"),
    ],
    optional: &[],
    quantities: &[(DURATION, "Minute"), (PRICE, PRICE_UNIT)],
    arrays: &[],
    time_series: &[REAL_POWER],
};

static SCHEMA: LazyLock<SchemaDescriptor> =
    LazyLock::new(|| ABSTRACT_RESULT_MESSAGE_SCHEMA.extend(&OFFER));

/// Accepts power blocks with at least one timestamp and one series, every
/// series in `kW`.
#[must_use]
pub fn is_power_block(block: &TimeSeriesBlock) -> bool {
    !block.time_index().is_empty()
        && !block.series().is_empty()
        && block
            .series()
            .values()
            .all(|series| series.unit_of_measure() == "kW")
}

fn duration_rule() -> MessageResult<QuantityRule> {
    Ok(SCHEMA.quantity_rule(DURATION)?.with_check(rules::non_negative))
}

fn price_rule() -> MessageResult<QuantityRule> {
    Ok(SCHEMA
        .quantity_rule(PRICE)?
        .with_alternative_units(&[PRICE_UNIT_MWH])
        .with_check(rules::non_negative))
}

fn real_power_rule() -> MessageResult<TimeSeriesRule> {
    Ok(SCHEMA.time_series_rule(REAL_POWER)?.with_check(is_power_block))
}

/// An offer of flexible power for a congestion.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferMessage {
    envelope: Envelope,
    activation_time: String,
    duration: QuantityBlock,
    direction: Direction,
    real_power: TimeSeriesBlock,
    price: QuantityBlock,
    congestion_id: String,
    offer_id: String,
    offer_count: u64,
}

impl OfferMessage {
    /// Returns the normalised activation time.
    #[must_use]
    pub fn activation_time(&self) -> &str {
        &self.activation_time
    }

    /// Returns the offered duration in minutes.
    #[must_use]
    pub const fn duration(&self) -> &QuantityBlock {
        &self.duration
    }

    /// Returns the regulation direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the offered power profile.
    #[must_use]
    pub const fn real_power(&self) -> &TimeSeriesBlock {
        &self.real_power
    }

    /// Returns the price.
    #[must_use]
    pub const fn price(&self) -> &QuantityBlock {
        &self.price
    }

    /// Returns the congestion this offer answers.
    #[must_use]
    pub fn congestion_id(&self) -> &str {
        &self.congestion_id
    }

    /// Returns the offer identifier.
    #[must_use]
    pub fn offer_id(&self) -> &str {
        &self.offer_id
    }

    /// Returns the number of offers the sender makes for this congestion.
    #[must_use]
    pub const fn offer_count(&self) -> u64 {
        self.offer_count
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
        self.duration = rules::required_quantity(value.into(), &duration_rule()?)?;
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

    /// Sets the power profile.
    ///
    /// # Errors
    ///
    /// Returns a value error for a malformed block or one that is empty or
    /// not in `kW`.
    pub fn set_real_power(&mut self, value: impl Into<TimeSeriesInput>) -> MessageResult<()> {
        self.real_power = rules::required_time_series(value.into(), &real_power_rule()?)?;
        Ok(())
    }

    /// Sets the price.
    ///
    /// A bare number is taken in `{EUR}/(kW.h)`.
    ///
    /// # Errors
    ///
    /// Returns a unit value error for an unsupported unit and a value error
    /// for a negative or non-numeric value.
    pub fn set_price(&mut self, value: impl Into<QuantityInput>) -> MessageResult<()> {
        self.price = rules::required_quantity(value.into(), &price_rule()?)?;
        Ok(())
    }

    /// Sets the congestion identifier.
    ///
    /// # Errors
    ///
    /// Returns a value error for an empty identifier.
    pub fn set_congestion_id(&mut self, value: impl Into<String>) -> MessageResult<()> {
        self.congestion_id = rules::non_empty(value, CONGESTION_ID)?;
        Ok(())
    }

    /// Sets the offer identifier.
    ///
    /// # Errors
    ///
    /// Returns a value error for an empty identifier.
    pub fn set_offer_id(&mut self, value: impl Into<String>) -> MessageResult<()> {
        self.offer_id = rules::non_empty(value, OFFER_ID)?;
        Ok(())
    }

    /// Sets the offer count.
    ///
    /// # Errors
    ///
    /// Returns a value error for a negative, fractional or non-numeric
    /// count.
    pub fn set_offer_count(&mut self, value: impl Into<CountInput>) -> MessageResult<()> {
        self.offer_count = rules::count(value.into(), OFFER_COUNT)?;
        Ok(())
    }
}

impl MessageType for OfferMessage {
    const MESSAGE_TYPE: &'static str = "Offer";
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
            activation_time: rules::datetime(
                DateTimeInput::from_json(attributes.value(ACTIVATION_TIME))?,
                ACTIVATION_TIME,
            )?,
            duration: rules::required_quantity(
                QuantityInput::from_json(attributes.value(DURATION))?,
                &duration_rule()?,
            )?,
            direction: rules::direction(attributes.text(DIRECTION)?, DIRECTION)?,
            real_power: rules::required_time_series(
                attributes.value(REAL_POWER).into(),
                &real_power_rule()?,
            )?,
            price: rules::required_quantity(
                QuantityInput::from_json(attributes.value(PRICE))?,
                &price_rule()?,
            )?,
            congestion_id: rules::non_empty(attributes.text(CONGESTION_ID)?, CONGESTION_ID)?,
            offer_id: rules::non_empty(attributes.text(OFFER_ID)?, OFFER_ID)?,
            offer_count: rules::count(
                CountInput::from_json(attributes.value(OFFER_COUNT))?,
                OFFER_COUNT,
            )?,
        })
    }

    fn attribute_value(&self, internal_name: &str) -> Option<Value> {
        match internal_name {
            "activation_time" => Some(json!(self.activation_time)),
            "duration" => Some(self.duration.to_json()),
            "direction" => Some(json!(self.direction)),
            "real_power" => Some(self.real_power.to_json()),
            "price" => Some(self.price.to_json()),
            "congestion_id" => Some(json!(self.congestion_id)),
            "offer_id" => Some(json!(self.offer_id)),
            "offer_count" => Some(json!(self.offer_count)),
            _ => None,
        }
    }
}
