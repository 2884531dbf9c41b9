//! Outcome of a local flexibility market round.
//!
//! Every field except `ResultCount` may be absent or `null`; a result
//! without accepted offers carries only the count.

use super::{
    CountInput, CustomerIdsInput, DateTimeInput, Direction, Envelope, QuantityBlock,
    QuantityInput, TimeSeriesBlock, TimeSeriesInput, envelope::ABSTRACT_RESULT_MESSAGE_SCHEMA,
    offer::is_power_block,
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
const RESULT_COUNT: &str = "ResultCount";
const CUSTOMER_IDS: &str = "CustomerIds";

const LFM_MARKET_RESULT: SchemaDeclarations = SchemaDeclarations {
    attributes: &[
        (ACTIVATION_TIME, "activation_time"),
        (DURATION, "duration"),
        (DIRECTION, "direction"),
        (REAL_POWER, "real_power"),
        (PRICE, "price"),
        (CONGESTION_ID, "congestion_id"),
        (OFFER_ID, "offer_id"),
        (RESULT_COUNT, "result_count"),
        (CUSTOMER_IDS, "customer_ids"),
    ],
    optional: &[
        ACTIVATION_TIME,
        DURATION,
        DIRECTION,
        REAL_POWER,
        PRICE,
        CONGESTION_ID,
        OFFER_ID,
        CUSTOMER_IDS,
    ],
    quantities: &[(DURATION, "Minute"), (PRICE, "EUR")],
    arrays: &[],
    time_series: &[REAL_POWER],
};

static SCHEMA: LazyLock<SchemaDescriptor> =
    LazyLock::new(|| ABSTRACT_RESULT_MESSAGE_SCHEMA.extend(&LFM_MARKET_RESULT));

fn quantity_rule(attribute: &'static str) -> MessageResult<QuantityRule> {
    Ok(SCHEMA.quantity_rule(attribute)?.with_check(rules::non_negative))
}

fn real_power_rule() -> MessageResult<TimeSeriesRule> {
    Ok(SCHEMA.time_series_rule(REAL_POWER)?.with_check(is_power_block))
}

fn optional_non_empty(value: Option<&str>, attribute: &str) -> MessageResult<Option<String>> {
    value.map(|text| rules::non_empty(text, attribute)).transpose()
}

/// Result of a market round for one congestion.
#[derive(Debug, Clone, PartialEq)]
pub struct LfmMarketResultMessage {
    envelope: Envelope,
    activation_time: Option<String>,
    duration: Option<QuantityBlock>,
    direction: Option<Direction>,
    real_power: Option<TimeSeriesBlock>,
    price: Option<QuantityBlock>,
    congestion_id: Option<String>,
    offer_id: Option<String>,
    result_count: u64,
    customer_ids: Option<Vec<String>>,
}

impl LfmMarketResultMessage {
    /// Returns the activation time of the accepted offer.
    #[must_use]
    pub fn activation_time(&self) -> Option<&str> {
        self.activation_time.as_deref()
    }

    /// Returns the duration of the accepted offer.
    #[must_use]
    pub const fn duration(&self) -> Option<&QuantityBlock> {
        self.duration.as_ref()
    }

    /// Returns the regulation direction.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Returns the accepted power profile.
    #[must_use]
    pub const fn real_power(&self) -> Option<&TimeSeriesBlock> {
        self.real_power.as_ref()
    }

    /// Returns the clearing price in `EUR`.
    #[must_use]
    pub const fn price(&self) -> Option<&QuantityBlock> {
        self.price.as_ref()
    }

    /// Returns the congestion identifier.
    #[must_use]
    pub fn congestion_id(&self) -> Option<&str> {
        self.congestion_id.as_deref()
    }

    /// Returns the accepted offer identifier.
    #[must_use]
    pub fn offer_id(&self) -> Option<&str> {
        self.offer_id.as_deref()
    }

    /// Returns the number of results published for the congestion.
    #[must_use]
    pub const fn result_count(&self) -> u64 {
        self.result_count
    }

    /// Returns the affected customers.
    #[must_use]
    pub fn customer_ids(&self) -> Option<&[String]> {
        self.customer_ids.as_deref()
    }

    /// Sets or clears the activation time.
    ///
    /// # Errors
    ///
    /// Returns a date error when a given time is not ISO 8601.
    pub fn set_activation_time(&mut self, value: impl Into<DateTimeInput>) -> MessageResult<()> {
        self.activation_time = rules::optional_datetime(value.into(), ACTIVATION_TIME)?;
        Ok(())
    }

    /// Sets or clears the duration.
    ///
    /// # Errors
    ///
    /// Returns a unit value error for a unit other than `Minute` and a value
    /// error for a negative or non-numeric value.
    pub fn set_duration(&mut self, value: impl Into<QuantityInput>) -> MessageResult<()> {
        self.duration = rules::quantity(value.into(), &quantity_rule(DURATION)?)?;
        Ok(())
    }

    /// Sets or clears the direction.
    ///
    /// # Errors
    ///
    /// Returns a value error for an unknown direction.
    pub fn set_direction(&mut self, value: Option<&str>) -> MessageResult<()> {
        self.direction = value
            .map(|text| rules::direction(text, DIRECTION))
            .transpose()?;
        Ok(())
    }

    /// Sets or clears the power profile.
    ///
    /// # Errors
    ///
    /// Returns a value error for a malformed block or one that is empty or
    /// not in `kW`.
    pub fn set_real_power(&mut self, value: impl Into<TimeSeriesInput>) -> MessageResult<()> {
        self.real_power = rules::time_series(value.into(), &real_power_rule()?)?;
        Ok(())
    }

    /// Sets or clears the price.
    ///
    /// # Errors
    ///
    /// Returns a unit value error for a unit other than `EUR` and a value
    /// error for a negative or non-numeric value.
    pub fn set_price(&mut self, value: impl Into<QuantityInput>) -> MessageResult<()> {
        self.price = rules::quantity(value.into(), &quantity_rule(PRICE)?)?;
        Ok(())
    }

    /// Sets or clears the congestion identifier.
    ///
    /// # Errors
    ///
    /// Returns a value error for an empty identifier.
    pub fn set_congestion_id(&mut self, value: Option<&str>) -> MessageResult<()> {
        self.congestion_id = optional_non_empty(value, CONGESTION_ID)?;
        Ok(())
    }

    /// Sets or clears the offer identifier.
    ///
    /// # Errors
    ///
    /// Returns a value error for an empty identifier.
    pub fn set_offer_id(&mut self, value: Option<&str>) -> MessageResult<()> {
        self.offer_id = optional_non_empty(value, OFFER_ID)?;
        Ok(())
    }

    /// Sets the result count.
    ///
    /// # Errors
    ///
    /// Returns a value error for a negative, fractional or non-numeric
    /// count.
    pub fn set_result_count(&mut self, value: impl Into<CountInput>) -> MessageResult<()> {
        self.result_count = rules::count(value.into(), RESULT_COUNT)?;
        Ok(())
    }

    /// Sets or clears the affected customers.
    ///
    /// # Errors
    ///
    /// Returns a value error for an empty identifier or list.
    pub fn set_customer_ids(&mut self, value: impl Into<CustomerIdsInput>) -> MessageResult<()> {
        self.customer_ids = match value.into() {
            CustomerIdsInput::Missing => None,
            other => Some(rules::customer_ids(other, CUSTOMER_IDS)?),
        };
        Ok(())
    }
}

impl MessageType for LfmMarketResultMessage {
    const MESSAGE_TYPE: &'static str = "LFMMarketResult";
    const TYPE_CHECK: bool = true;

    fn schema() -> &'static SchemaDescriptor {
        &SCHEMA
    }

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn from_attributes(envelope: Envelope, attributes: &Attributes<'_>) -> MessageResult<Self> {
        let customer_ids = match CustomerIdsInput::from_json(attributes.value(CUSTOMER_IDS))? {
            CustomerIdsInput::Missing => None,
            other => Some(rules::customer_ids(other, CUSTOMER_IDS)?),
        };
        Ok(Self {
            envelope,
            activation_time: rules::optional_datetime(
                DateTimeInput::from_json(attributes.value(ACTIVATION_TIME))?,
                ACTIVATION_TIME,
            )?,
            duration: rules::quantity(
                QuantityInput::from_json(attributes.value(DURATION))?,
                &quantity_rule(DURATION)?,
            )?,
            direction: attributes
                .optional_text(DIRECTION)?
                .map(|text| rules::direction(text, DIRECTION))
                .transpose()?,
            real_power: rules::time_series(
                attributes.value(REAL_POWER).into(),
                &real_power_rule()?,
            )?,
            price: rules::quantity(
                QuantityInput::from_json(attributes.value(PRICE))?,
                &quantity_rule(PRICE)?,
            )?,
            congestion_id: optional_non_empty(
                attributes.optional_text(CONGESTION_ID)?,
                CONGESTION_ID,
            )?,
            offer_id: optional_non_empty(attributes.optional_text(OFFER_ID)?, OFFER_ID)?,
            result_count: rules::count(
                CountInput::from_json(attributes.value(RESULT_COUNT))?,
                RESULT_COUNT,
            )?,
            customer_ids,
        })
    }

    fn attribute_value(&self, internal_name: &str) -> Option<Value> {
        match internal_name {
            "activation_time" => self.activation_time.as_ref().map(|time| json!(time)),
            "duration" => self.duration.as_ref().map(QuantityBlock::to_json),
            "direction" => self.direction.map(|direction| json!(direction)),
            "real_power" => self.real_power.as_ref().map(TimeSeriesBlock::to_json),
            "price" => self.price.as_ref().map(QuantityBlock::to_json),
            "congestion_id" => self.congestion_id.as_ref().map(|id| json!(id)),
            "offer_id" => self.offer_id.as_ref().map(|id| json!(id)),
            "result_count" => Some(json!(self.result_count)),
            "customer_ids" => self.customer_ids.as_ref().map(|ids| json!(ids)),
            _ => None,
        }
    }
}
