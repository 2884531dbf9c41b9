//! Individual field validation rules.
//!
//! Each rule is a pure function that turns a candidate input into the
//! canonical stored value or a specific [`MessageError`]. Message setters
//! and JSON constructors share these rules, so both paths accept and reject
//! exactly the same inputs.

use super::datetime;
use crate::message::{
    domain::{
        CountInput, CustomerIdsInput, DateTimeInput, Direction, QuantityBlock, QuantityInput,
        TimeSeriesBlock, TimeSeriesInput, ValueArrayBlock, ValueArrayInput,
    },
    error::{MessageError, MessageResult},
};

/// Predicate over a numeric value.
pub type ValueCheck = fn(f64) -> bool;

/// Predicate over a complete time series block.
pub type BlockCheck = fn(&TimeSeriesBlock) -> bool;

/// Accepts any value.
#[must_use]
pub const fn any_value(_value: f64) -> bool {
    true
}

/// Accepts zero and positive values.
#[must_use]
pub const fn non_negative(value: f64) -> bool {
    value >= 0.0
}

/// Accepts any block that passed the structural checks.
#[must_use]
pub const fn any_block(_block: &TimeSeriesBlock) -> bool {
    true
}

/// Validation rule for a quantity attribute.
///
/// The first accepted unit is the default given to bare numbers.
#[derive(Debug, Clone, Copy)]
pub struct QuantityRule {
    attribute: &'static str,
    unit: &'static str,
    alternative_units: &'static [&'static str],
    can_be_none: bool,
    check: ValueCheck,
}

impl QuantityRule {
    /// Creates a rule requiring `unit` and accepting any finite value.
    #[must_use]
    pub const fn new(attribute: &'static str, unit: &'static str) -> Self {
        Self {
            attribute,
            unit,
            alternative_units: &[],
            can_be_none: false,
            check: any_value,
        }
    }

    /// Allows the attribute to be left unset.
    #[must_use]
    pub const fn optional(mut self, can_be_none: bool) -> Self {
        self.can_be_none = can_be_none;
        self
    }

    /// Accepts explicit quantities in these units besides the default one.
    #[must_use]
    pub const fn with_alternative_units(mut self, units: &'static [&'static str]) -> Self {
        self.alternative_units = units;
        self
    }

    /// Sets the range check applied to the value.
    #[must_use]
    pub const fn with_check(mut self, check: ValueCheck) -> Self {
        self.check = check;
        self
    }

    /// Returns the default unit.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        self.unit
    }

    /// Returns `true` when `unit` is accepted by this rule.
    #[must_use]
    pub fn accepts_unit(&self, unit: &str) -> bool {
        unit == self.unit || self.alternative_units.iter().any(|allowed| *allowed == unit)
    }
}

/// Validation rule for a value array attribute.
#[derive(Debug, Clone, Copy)]
pub struct ArrayRule {
    attribute: &'static str,
    unit: &'static str,
    can_be_none: bool,
    min_length: usize,
}

impl ArrayRule {
    /// Creates a rule requiring `unit`.
    #[must_use]
    pub const fn new(attribute: &'static str, unit: &'static str) -> Self {
        Self {
            attribute,
            unit,
            can_be_none: false,
            min_length: 0,
        }
    }

    /// Allows the attribute to be left unset.
    #[must_use]
    pub const fn optional(mut self, can_be_none: bool) -> Self {
        self.can_be_none = can_be_none;
        self
    }

    /// Requires at least `min_length` values.
    #[must_use]
    pub const fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }
}

/// Validation rule for a time series attribute.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesRule {
    attribute: &'static str,
    can_be_none: bool,
    check: BlockCheck,
}

impl TimeSeriesRule {
    /// Creates a rule accepting any structurally valid block.
    #[must_use]
    pub const fn new(attribute: &'static str) -> Self {
        Self {
            attribute,
            can_be_none: false,
            check: any_block,
        }
    }

    /// Allows the attribute to be left unset.
    #[must_use]
    pub const fn optional(mut self, can_be_none: bool) -> Self {
        self.can_be_none = can_be_none;
        self
    }

    /// Sets the message specific acceptance check.
    #[must_use]
    pub const fn with_check(mut self, check: BlockCheck) -> Self {
        self.check = check;
        self
    }
}

/// Validates a quantity input.
///
/// Returns `Ok(None)` only when the input is missing and the rule allows it.
///
/// # Errors
///
/// Returns a unit value error when an explicit quantity carries a unit the
/// rule does not accept, and a value error for missing, non-numeric or out
/// of range values.
pub fn quantity(input: QuantityInput, rule: &QuantityRule) -> MessageResult<Option<QuantityBlock>> {
    let attribute = rule.attribute;
    let (value, unit) = match input {
        QuantityInput::Missing if rule.can_be_none => return Ok(None),
        QuantityInput::Missing => {
            return Err(MessageError::value(format!(
                "a value is required for {attribute}"
            )));
        }
        QuantityInput::Number(value) => (value, rule.unit),
        QuantityInput::Text(text) => {
            let value = text.trim().parse::<f64>().map_err(|_| {
                MessageError::value(format!("'{text}' is an invalid value for {attribute}"))
            })?;
            (value, rule.unit)
        }
        QuantityInput::Block(block) => {
            if !rule.accepts_unit(block.unit_of_measure()) {
                return Err(MessageError::unit(format!(
                    "'{}' is an invalid unit of measure for {attribute}, expected '{}'",
                    block.unit_of_measure(),
                    rule.unit
                )));
            }
            return checked_quantity(block, rule).map(Some);
        }
    };
    let block = QuantityBlock::checked(value, unit.to_owned()).map_err(|fault| {
        MessageError::value(format!("'{value}' is an invalid value for {attribute}: {fault}"))
    })?;
    checked_quantity(block, rule).map(Some)
}

/// Validates a quantity input for an attribute that must hold a value.
///
/// # Errors
///
/// See [`quantity`]; a missing input is always rejected.
pub fn required_quantity(input: QuantityInput, rule: &QuantityRule) -> MessageResult<QuantityBlock> {
    quantity(input, &rule.optional(false))?.ok_or_else(|| {
        MessageError::value(format!("a value is required for {}", rule.attribute))
    })
}

fn checked_quantity(block: QuantityBlock, rule: &QuantityRule) -> MessageResult<QuantityBlock> {
    if (rule.check)(block.value()) {
        Ok(block)
    } else {
        Err(MessageError::value(format!(
            "'{}' is an invalid value for {}",
            block.value(),
            rule.attribute
        )))
    }
}

/// Validates a value array input.
///
/// # Errors
///
/// Returns a unit value error for a unit mismatch and a value error for
/// missing, malformed or too short arrays.
pub fn value_array(
    input: ValueArrayInput,
    rule: &ArrayRule,
) -> MessageResult<Option<ValueArrayBlock>> {
    let attribute = rule.attribute;
    let block = match input {
        ValueArrayInput::Missing if rule.can_be_none => return Ok(None),
        ValueArrayInput::Missing => {
            return Err(MessageError::value(format!(
                "a value is required for {attribute}"
            )));
        }
        ValueArrayInput::Raw(json) => ValueArrayBlock::parse(&json).map_err(|fault| {
            MessageError::value(format!("'{json}' is an invalid value for {attribute}: {fault}"))
        })?,
        ValueArrayInput::Block(block) => block,
    };
    if block.unit_of_measure() != rule.unit {
        return Err(MessageError::unit(format!(
            "'{}' is an invalid unit of measure for {attribute}, expected '{}'",
            block.unit_of_measure(),
            rule.unit
        )));
    }
    if block.len() < rule.min_length {
        return Err(MessageError::value(format!(
            "{attribute} requires at least {} values, got {}",
            rule.min_length,
            block.len()
        )));
    }
    Ok(Some(block))
}

/// Validates a time series input.
///
/// Structural failures and a failing block check are both reported as
/// value errors carrying the underlying reason.
///
/// # Errors
///
/// Returns a value error when the input is missing (and not allowed to be),
/// malformed, or rejected by the rule's block check.
pub fn time_series(
    input: TimeSeriesInput,
    rule: &TimeSeriesRule,
) -> MessageResult<Option<TimeSeriesBlock>> {
    let attribute = rule.attribute;
    let block = match input {
        TimeSeriesInput::Missing if rule.can_be_none => return Ok(None),
        TimeSeriesInput::Missing => {
            return Err(MessageError::value(format!(
                "a value is required for {attribute}"
            )));
        }
        TimeSeriesInput::Raw(json) => TimeSeriesBlock::parse(&json).map_err(|fault| {
            MessageError::value(format!("'{json}' is an invalid value for {attribute}: {fault}"))
        })?,
        TimeSeriesInput::Block(block) => block,
    };
    if (rule.check)(&block) {
        Ok(Some(block))
    } else {
        Err(MessageError::value(format!(
            "'{}' is an invalid value for {attribute}",
            block.to_json()
        )))
    }
}

/// Validates a time series input for an attribute that must hold a value.
///
/// # Errors
///
/// See [`time_series`]; a missing input is always rejected.
pub fn required_time_series(
    input: TimeSeriesInput,
    rule: &TimeSeriesRule,
) -> MessageResult<TimeSeriesBlock> {
    time_series(input, &rule.optional(false))?.ok_or_else(|| {
        MessageError::value(format!("a value is required for {}", rule.attribute))
    })
}

/// Validates and normalises a timestamp.
///
/// # Errors
///
/// Returns a date error when the input is missing or not ISO 8601.
pub fn datetime(input: DateTimeInput, attribute: &str) -> MessageResult<String> {
    match input {
        DateTimeInput::Missing => Err(MessageError::date(format!(
            "a timestamp is required for {attribute}"
        ))),
        DateTimeInput::Text(text) => datetime::normalize_datetime(&text).ok_or_else(|| {
            MessageError::date(format!("'{text}' is an invalid {attribute}"))
        }),
        DateTimeInput::DateTime(value) => Ok(datetime::to_iso_format(&value)),
    }
}

/// Validates and normalises an optional timestamp.
///
/// # Errors
///
/// Returns a date error when a given timestamp is not ISO 8601.
pub fn optional_datetime(input: DateTimeInput, attribute: &str) -> MessageResult<Option<String>> {
    match input {
        DateTimeInput::Missing => Ok(None),
        other => datetime(other, attribute).map(Some),
    }
}

/// Validates a regulation direction.
///
/// # Errors
///
/// Returns a value error for anything but `upregulation` or
/// `downregulation`.
pub fn direction(value: &str, attribute: &str) -> MessageResult<Direction> {
    Direction::try_from(value)
        .map_err(|error| MessageError::value(format!("{error} for {attribute}")))
}

/// Validates a string that must not be empty.
///
/// # Errors
///
/// Returns a value error for an empty string.
pub fn non_empty(value: impl Into<String>, attribute: &str) -> MessageResult<String> {
    let text = value.into();
    if text.is_empty() {
        return Err(MessageError::value(format!(
            "'{text}' is an invalid value for {attribute}"
        )));
    }
    Ok(text)
}

/// Validates a non-negative integer count.
///
/// Integers, integral floats and numeric strings are accepted.
///
/// # Errors
///
/// Returns a value error for missing, negative, fractional or non-numeric
/// input.
pub fn count(input: CountInput, attribute: &str) -> MessageResult<u64> {
    checked_count(input, attribute).map_err(MessageError::value)
}

/// Checks a count, returning the rejection reason without raising an error.
pub(crate) fn checked_count(input: CountInput, attribute: &str) -> Result<u64, String> {
    let invalid = |shown: String| format!("'{shown}' is an invalid value for {attribute}");
    match input {
        CountInput::Missing => Err(format!("a value is required for {attribute}")),
        CountInput::Integer(value) => u64::try_from(value).map_err(|_| invalid(value.to_string())),
        CountInput::Float(value) => integral_count(value).ok_or_else(|| invalid(value.to_string())),
        CountInput::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(integral_count)
            .ok_or_else(|| invalid(text)),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is checked to be a non-negative integral float within u64 range"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "u64::MAX as f64 rounds up to 2^64, the exclusive upper bound"
)]
fn integral_count(value: f64) -> Option<u64> {
    let in_range = value.is_finite() && value >= 0.0 && value < u64::MAX as f64;
    (in_range && value.fract() <= 0.0).then_some(value as u64)
}

/// Validates customer identifiers and normalises them to a list.
///
/// # Errors
///
/// Returns a value error for a missing input, an empty string or an empty
/// list.
pub fn customer_ids(input: CustomerIdsInput, attribute: &str) -> MessageResult<Vec<String>> {
    match input {
        CustomerIdsInput::Single(id) if !id.is_empty() => Ok(vec![id]),
        CustomerIdsInput::Many(ids) if !ids.is_empty() => Ok(ids),
        CustomerIdsInput::Missing => Err(MessageError::value(format!(
            "a value is required for {attribute}"
        ))),
        CustomerIdsInput::Single(_) | CustomerIdsInput::Many(_) => Err(MessageError::value(
            format!("an empty value is invalid for {attribute}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const DURATION: QuantityRule = QuantityRule::new("Duration", "Minute").with_check(non_negative);
    const PRICE: QuantityRule = QuantityRule::new("Price", "{EUR}/(kW.h)")
        .with_alternative_units(&["{EUR}/(MW.h)"])
        .with_check(non_negative);

    fn block(value: f64, unit: &str) -> QuantityInput {
        QuantityInput::Block(QuantityBlock::new(value, unit).expect("valid block"))
    }

    #[rstest]
    #[case(QuantityInput::Number(15.0))]
    #[case(QuantityInput::from(15))]
    #[case(QuantityInput::from("15"))]
    #[case(block(15.0, "Minute"))]
    fn quantity_accepts_each_input_shape(#[case] input: QuantityInput) {
        let result = required_quantity(input, &DURATION).expect("valid quantity");
        assert_eq!(result, QuantityBlock::new(15.0, "Minute").expect("valid block"));
    }

    #[rstest]
    fn quantity_rejects_wrong_unit() {
        let error = required_quantity(block(15.0, "Hour"), &DURATION).expect_err("wrong unit");
        assert!(matches!(error, MessageError::UnitValue(_)));
    }

    #[rstest]
    #[case(QuantityInput::Number(-1.0))]
    #[case(QuantityInput::from("abc"))]
    #[case(QuantityInput::Number(f64::NAN))]
    #[case(QuantityInput::Missing)]
    fn quantity_rejects_invalid_values(#[case] input: QuantityInput) {
        let error = required_quantity(input, &DURATION).expect_err("invalid value");
        assert!(matches!(error, MessageError::Value(_)));
    }

    #[rstest]
    fn quantity_allows_missing_when_optional() {
        let rule = DURATION.optional(true);
        assert_eq!(quantity(QuantityInput::Missing, &rule), Ok(None));
    }

    #[rstest]
    fn quantity_alternative_units_keep_their_unit() {
        let result = required_quantity(block(2.0, "{EUR}/(MW.h)"), &PRICE).expect("valid price");
        assert_eq!(result.unit_of_measure(), "{EUR}/(MW.h)");
        let bare = required_quantity(QuantityInput::Number(2.0), &PRICE).expect("valid price");
        assert_eq!(bare.unit_of_measure(), "{EUR}/(kW.h)");
    }

    #[rstest]
    fn value_array_checks_unit_and_length() {
        let rule = ArrayRule::new("Samples", "kW").with_min_length(2);
        let valid = value_array(
            ValueArrayInput::Raw(json!({"Values": [1.0, 2.0], "UnitOfMeasure": "kW"})),
            &rule,
        )
        .expect("valid array");
        assert_eq!(valid.map(|array| array.len()), Some(2));

        let wrong_unit = value_array(
            ValueArrayInput::Raw(json!({"Values": [1.0, 2.0], "UnitOfMeasure": "MW"})),
            &rule,
        )
        .expect_err("wrong unit");
        assert!(matches!(wrong_unit, MessageError::UnitValue(_)));

        let too_short = value_array(
            ValueArrayInput::Raw(json!({"Values": [1.0], "UnitOfMeasure": "kW"})),
            &rule,
        )
        .expect_err("too short");
        assert!(matches!(too_short, MessageError::Value(_)));
    }

    #[rstest]
    fn time_series_reports_structural_failures_as_value_errors() {
        let rule = TimeSeriesRule::new("RealPower");
        let error = time_series(
            TimeSeriesInput::Raw(json!({
                "TimeIndex": ["2020-06-03T04:00:00Z"],
                "Series": {"RealPower": {"Values": [1.0, 2.0], "UnitOfMeasure": "kW"}}
            })),
            &rule,
        )
        .expect_err("length mismatch");
        assert!(matches!(error, MessageError::Value(_)));
        assert!(
            error
                .message()
                .ends_with("series 'RealPower' has 2 values but the time index has 1 entries")
        );
    }

    #[rstest]
    fn block_reasons_are_reported_under_the_field_kind() {
        let rule = ArrayRule::new("Samples", "kW");
        let error = value_array(ValueArrayInput::Raw(json!({"Values": [1.0]})), &rule)
            .expect_err("no unit");
        assert!(matches!(error, MessageError::Value(_)));
        assert!(error.message().contains("UnitOfMeasure"));

        let bad_time = time_series(
            TimeSeriesInput::Raw(json!({"TimeIndex": ["soon"], "Series": {}})),
            &TimeSeriesRule::new("RealPower"),
        )
        .expect_err("invalid time index");
        assert!(matches!(bad_time, MessageError::Value(_)));
        assert!(bad_time.message().ends_with("'soon' is an invalid time index entry"));
    }

    #[rstest]
    fn checked_count_returns_the_reason() {
        assert_eq!(
            checked_count(CountInput::Integer(-1), "EpochNumber"),
            Err("'-1' is an invalid value for EpochNumber".to_owned())
        );
    }

    #[rstest]
    fn time_series_applies_block_check() {
        let rule = TimeSeriesRule::new("RealPower").with_check(|block| block.series().len() > 1);
        let error = required_time_series(
            TimeSeriesInput::Raw(json!({
                "TimeIndex": ["2020-06-03T04:00:00Z"],
                "Series": {"RealPower": {"Values": [1.0], "UnitOfMeasure": "kW"}}
            })),
            &rule,
        )
        .expect_err("rejected by check");
        assert!(matches!(error, MessageError::Value(_)));
    }

    #[rstest]
    #[case(CountInput::Integer(3), 3)]
    #[case(CountInput::Float(3.0), 3)]
    #[case(CountInput::from("3"), 3)]
    #[case(CountInput::from("3.0"), 3)]
    #[case(CountInput::Integer(0), 0)]
    #[case(CountInput::Float(9_007_199_254_740_992.0), 9_007_199_254_740_992)]
    fn count_accepts_integral_values(#[case] input: CountInput, #[case] expected: u64) {
        assert_eq!(count(input, "OfferCount"), Ok(expected));
    }

    #[rstest]
    #[case(CountInput::Float(3.5))]
    #[case(CountInput::Integer(-1))]
    #[case(CountInput::Float(-1.0))]
    #[case(CountInput::Missing)]
    #[case(CountInput::from("three"))]
    #[case(CountInput::Float(f64::INFINITY))]
    #[case(CountInput::Float(18_446_744_073_709_551_616.0))]
    #[case(CountInput::from("18446744073709551616"))]
    fn count_rejects_other_values(#[case] input: CountInput) {
        let error = count(input, "OfferCount").expect_err("invalid count");
        assert!(matches!(error, MessageError::Value(_)));
    }

    #[rstest]
    #[case(CustomerIdsInput::from("c1"), vec!["c1"])]
    #[case(CustomerIdsInput::from(vec!["c1", "c2"]), vec!["c1", "c2"])]
    fn customer_ids_normalizes_to_list(#[case] input: CustomerIdsInput, #[case] expected: Vec<&str>) {
        assert_eq!(customer_ids(input, "CustomerIds").expect("valid ids"), expected);
    }

    #[rstest]
    #[case(CustomerIdsInput::Many(Vec::new()))]
    #[case(CustomerIdsInput::from(""))]
    #[case(CustomerIdsInput::Missing)]
    fn customer_ids_rejects_empty_or_missing(#[case] input: CustomerIdsInput) {
        assert!(customer_ids(input, "CustomerIds").is_err());
    }

    #[rstest]
    fn datetime_normalizes_and_reports_date_errors() {
        assert_eq!(
            datetime(DateTimeInput::from("2020-06-03T04:00:00Z"), "ActivationTime"),
            Ok("2020-06-03T04:00:00.000Z".to_owned())
        );
        let error = datetime(DateTimeInput::from("soon"), "ActivationTime").expect_err("invalid");
        assert!(matches!(error, MessageError::Date(_)));
        assert_eq!(optional_datetime(DateTimeInput::Missing, "ActivationTime"), Ok(None));
    }

    #[rstest]
    fn direction_reports_value_errors() {
        assert_eq!(direction("upregulation", "Direction"), Ok(Direction::Upregulation));
        let error = direction("sideways", "Direction").expect_err("invalid direction");
        assert!(matches!(error, MessageError::Value(_)));
    }
}
