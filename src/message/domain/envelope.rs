//! Envelope fields shared by every message type.
//!
//! The envelope owns the discriminator, identifiers, lineage and timestamp
//! of a message. Its attributes live in two base schema descriptors which
//! every concrete message type extends.

use super::inputs::{CountInput, DateTimeInput};
use crate::message::{
    error::{MessageError, MessageResult},
    schema::{Attributes, SchemaDeclarations, SchemaDescriptor},
    validation::{datetime, rules},
};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Wire name of the discriminator attribute.
pub const TYPE_ATTRIBUTE: &str = "Type";
const SIMULATION_ID: &str = "SimulationId";
const SOURCE_PROCESS_ID: &str = "SourceProcessId";
const MESSAGE_ID: &str = "MessageId";
const TIMESTAMP: &str = "Timestamp";
const EPOCH_NUMBER: &str = "EpochNumber";
const TRIGGERING_MESSAGE_IDS: &str = "TriggeringMessageIds";
const WARNINGS: &str = "Warnings";

/// Warning codes a result message may carry.
pub const WARNING_CODES: &[&str] = &[
    "warning.convergence",
    "warning.input",
    "warning.input.range",
    "warning.input.unreliable",
    "warning.internal",
    "warning.other",
];

const ABSTRACT_MESSAGE: SchemaDeclarations = SchemaDeclarations {
    attributes: &[
        (TYPE_ATTRIBUTE, "message_type"),
        (SIMULATION_ID, "simulation_id"),
        (SOURCE_PROCESS_ID, "source_process_id"),
        (MESSAGE_ID, "message_id"),
        (TIMESTAMP, "timestamp"),
    ],
    optional: &[],
    quantities: &[],
    arrays: &[],
    time_series: &[],
};

const ABSTRACT_RESULT_MESSAGE: SchemaDeclarations = SchemaDeclarations {
    attributes: &[
        (EPOCH_NUMBER, "epoch_number"),
        (TRIGGERING_MESSAGE_IDS, "triggering_message_ids"),
        (WARNINGS, "warnings"),
    ],
    optional: &[WARNINGS],
    quantities: &[],
    arrays: &[],
    time_series: &[],
};

/// Schema of the abstract message: discriminator, identifiers, timestamp.
pub static ABSTRACT_MESSAGE_SCHEMA: LazyLock<SchemaDescriptor> =
    LazyLock::new(|| SchemaDescriptor::root(&ABSTRACT_MESSAGE));

/// Schema of the abstract result message: the abstract message plus epoch
/// number, lineage and warnings.
pub static ABSTRACT_RESULT_MESSAGE_SCHEMA: LazyLock<SchemaDescriptor> =
    LazyLock::new(|| ABSTRACT_MESSAGE_SCHEMA.extend(&ABSTRACT_RESULT_MESSAGE));

/// Validated envelope of a result message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    message_type: String,
    simulation_id: String,
    source_process_id: String,
    message_id: String,
    timestamp: String,
    epoch_number: u64,
    triggering_message_ids: Vec<String>,
    warnings: Option<Vec<String>>,
}

impl Envelope {
    /// Checks the `Type` discriminator of a raw payload before any other
    /// attribute is looked at.
    ///
    /// When `expected_type` is given the `Type` attribute must equal it.
    ///
    /// # Errors
    ///
    /// Returns a value error when the payload is not an object and a type
    /// error when `Type` is missing, not a string, empty or unexpected.
    pub fn check_discriminator(json: &Value, expected_type: Option<&str>) -> MessageResult<()> {
        let object = json
            .as_object()
            .ok_or_else(|| MessageError::value("message payload must be a JSON object"))?;
        let missing = Value::Null;
        check_message_type(object.get(TYPE_ATTRIBUTE).unwrap_or(&missing), expected_type)?;
        Ok(())
    }

    /// Reads the envelope attributes from a checked payload.
    ///
    /// When `expected_type` is given the `Type` attribute must equal it.
    ///
    /// # Errors
    ///
    /// Returns the error kind owned by the first failing envelope attribute.
    pub fn from_attributes(
        attributes: &Attributes<'_>,
        expected_type: Option<&str>,
    ) -> MessageResult<Self> {
        Ok(Self {
            message_type: check_message_type(attributes.value(TYPE_ATTRIBUTE), expected_type)?,
            simulation_id: check_simulation_id(attributes.value(SIMULATION_ID))?,
            source_process_id: check_source_process_id(attributes.value(SOURCE_PROCESS_ID))?,
            message_id: check_message_id(attributes.value(MESSAGE_ID))?,
            timestamp: rules::datetime(
                DateTimeInput::from_json(attributes.value(TIMESTAMP))?,
                TIMESTAMP,
            )?,
            epoch_number: check_epoch_number(attributes.value(EPOCH_NUMBER))?,
            triggering_message_ids: check_triggering_message_ids(
                attributes.value(TRIGGERING_MESSAGE_IDS),
            )?,
            warnings: check_warnings(attributes.value(WARNINGS))?,
        })
    }

    /// Returns the `Type` discriminator.
    #[must_use]
    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    /// Returns the simulation identifier.
    #[must_use]
    pub fn simulation_id(&self) -> &str {
        &self.simulation_id
    }

    /// Returns the identifier of the sending process.
    #[must_use]
    pub fn source_process_id(&self) -> &str {
        &self.source_process_id
    }

    /// Returns the message identifier.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Returns the normalised creation timestamp.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the epoch number.
    #[must_use]
    pub const fn epoch_number(&self) -> u64 {
        self.epoch_number
    }

    /// Returns the identifiers of the messages that triggered this one.
    #[must_use]
    pub fn triggering_message_ids(&self) -> &[String] {
        &self.triggering_message_ids
    }

    /// Returns the warning codes, if any.
    #[must_use]
    pub fn warnings(&self) -> Option<&[String]> {
        self.warnings.as_deref()
    }

    /// Sets the epoch number.
    ///
    /// # Errors
    ///
    /// Returns an epoch value error for negative or non-integral input.
    pub fn set_epoch_number(&mut self, epoch_number: impl Into<CountInput>) -> MessageResult<()> {
        self.epoch_number = epoch_count(epoch_number.into())?;
        Ok(())
    }

    /// Sets the creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns a date error when the timestamp is not ISO 8601.
    pub fn set_timestamp(&mut self, timestamp: impl Into<DateTimeInput>) -> MessageResult<()> {
        self.timestamp = rules::datetime(timestamp.into(), TIMESTAMP)?;
        Ok(())
    }

    /// Sets the warning codes.
    ///
    /// # Errors
    ///
    /// Returns a value error for an empty list or an unknown warning code.
    pub fn set_warnings(&mut self, warnings: Option<Vec<String>>) -> MessageResult<()> {
        let checked = warnings
            .map(|codes| check_warning_codes(&codes).map(|()| codes))
            .transpose()?;
        self.warnings = checked;
        Ok(())
    }

    /// Returns the wire value of an envelope field by internal name.
    #[must_use]
    pub fn attribute_value(&self, internal_name: &str) -> Option<Value> {
        match internal_name {
            "message_type" => Some(json!(self.message_type)),
            "simulation_id" => Some(json!(self.simulation_id)),
            "source_process_id" => Some(json!(self.source_process_id)),
            "message_id" => Some(json!(self.message_id)),
            "timestamp" => Some(json!(self.timestamp)),
            "epoch_number" => Some(json!(self.epoch_number)),
            "triggering_message_ids" => Some(json!(self.triggering_message_ids)),
            "warnings" => self.warnings.as_ref().map(|codes| json!(codes)),
            _ => None,
        }
    }
}

fn check_message_type(value: &Value, expected_type: Option<&str>) -> MessageResult<String> {
    let message_type = match value {
        Value::String(text) => text.as_str(),
        Value::Null => {
            return Err(MessageError::type_mismatch(format!(
                "a value is required for {TYPE_ATTRIBUTE}"
            )));
        }
        _ => return Err(MessageError::type_mismatch("message type must be a string")),
    };
    if message_type.is_empty() {
        return Err(MessageError::type_mismatch("message type must not be empty"));
    }
    match expected_type {
        Some(expected) if expected != message_type => Err(MessageError::type_mismatch(format!(
            "'{message_type}' is not the expected message type '{expected}'"
        ))),
        _ => Ok(message_type.to_owned()),
    }
}

fn check_simulation_id(value: &Value) -> MessageResult<String> {
    value
        .as_str()
        .filter(|text| datetime::check_datetime(text))
        .map(str::to_owned)
        .ok_or_else(|| MessageError::id(format!("'{value}' is an invalid {SIMULATION_ID}")))
}

fn check_source_process_id(value: &Value) -> MessageResult<String> {
    value
        .as_str()
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| {
            MessageError::invalid_source(format!("'{value}' is an invalid {SOURCE_PROCESS_ID}"))
        })
}

fn check_message_id(value: &Value) -> MessageResult<String> {
    value
        .as_str()
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| MessageError::id(format!("'{value}' is an invalid {MESSAGE_ID}")))
}

fn check_epoch_number(value: &Value) -> MessageResult<u64> {
    let input = CountInput::classify(value)
        .ok_or_else(|| MessageError::epoch(format!("'{value}' is an invalid {EPOCH_NUMBER}")))?;
    epoch_count(input)
}

fn epoch_count(input: CountInput) -> MessageResult<u64> {
    rules::checked_count(input, EPOCH_NUMBER).map_err(MessageError::epoch)
}

fn check_triggering_message_ids(value: &Value) -> MessageResult<Vec<String>> {
    let invalid = || MessageError::id(format!("'{value}' is an invalid {TRIGGERING_MESSAGE_IDS}"));
    let items = value.as_array().filter(|items| !items.is_empty()).ok_or_else(invalid)?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .filter(|id| !id.is_empty())
                .map(str::to_owned)
                .ok_or_else(invalid)
        })
        .collect()
}

fn check_warnings(value: &Value) -> MessageResult<Option<Vec<String>>> {
    if value.is_null() {
        return Ok(None);
    }
    let codes = value
        .as_array()
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| MessageError::value(format!("'{value}' is an invalid {WARNINGS}")))?;
    check_warning_codes(&codes)?;
    Ok(Some(codes))
}

fn check_warning_codes(codes: &[String]) -> MessageResult<()> {
    if codes.is_empty() {
        return Err(MessageError::value(format!("{WARNINGS} must not be empty")));
    }
    match codes
        .iter()
        .find(|code| !WARNING_CODES.iter().any(|known| *known == code.as_str()))
    {
        Some(unknown) => Err(MessageError::value(format!(
            "'{unknown}' is not a valid warning code"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{error::MessageErrorKind, ports::message_type::ValidationConfig};
    use rstest::{fixture, rstest};

    #[fixture]
    fn payload() -> Value {
        json!({
            "Type": "Offer",
            "SimulationId": "2020-01-01T00:00:00.000Z",
            "SourceProcessId": "Storage1",
            "MessageId": "Storage1-1",
            "Timestamp": "2020-01-01T00:00:10.000Z",
            "EpochNumber": 1,
            "TriggeringMessageIds": ["Manager-1"]
        })
    }

    fn envelope_from(json: &Value, expected_type: Option<&str>) -> MessageResult<Envelope> {
        let attributes =
            ABSTRACT_RESULT_MESSAGE_SCHEMA.attributes(json, &ValidationConfig::default())?;
        Envelope::from_attributes(&attributes, expected_type)
    }

    #[rstest]
    fn reads_envelope_fields(payload: Value) {
        let envelope = envelope_from(&payload, Some("Offer")).expect("valid envelope");
        assert_eq!(envelope.message_type(), "Offer");
        assert_eq!(envelope.epoch_number(), 1);
        assert_eq!(envelope.triggering_message_ids(), &["Manager-1".to_owned()]);
        assert_eq!(envelope.warnings(), None);
    }

    #[rstest]
    #[case("Type", json!("Request"), MessageErrorKind::Type)]
    #[case("SimulationId", json!("sim-1"), MessageErrorKind::Id)]
    #[case("SourceProcessId", json!(""), MessageErrorKind::Source)]
    #[case("MessageId", json!(""), MessageErrorKind::Id)]
    #[case("Timestamp", json!("yesterday"), MessageErrorKind::Date)]
    #[case("EpochNumber", json!(-1), MessageErrorKind::EpochValue)]
    #[case("EpochNumber", json!(true), MessageErrorKind::EpochValue)]
    #[case("EpochNumber", json!(1.5), MessageErrorKind::EpochValue)]
    #[case("TriggeringMessageIds", json!([]), MessageErrorKind::Id)]
    #[case("Warnings", json!(["warning.unknown"]), MessageErrorKind::Value)]
    fn reports_the_owning_error_kind(
        mut payload: Value,
        #[case] attribute: &str,
        #[case] value: Value,
        #[case] expected: MessageErrorKind,
    ) {
        payload[attribute] = value;
        let error = envelope_from(&payload, Some("Offer")).expect_err("invalid envelope");
        assert_eq!(error.kind(), expected);
    }

    #[rstest]
    #[case(json!({"MessageId": "Storage1-1"}), Some("Offer"), MessageErrorKind::Type)]
    #[case(json!({"Type": 7}), None, MessageErrorKind::Type)]
    #[case(json!({"Type": ""}), None, MessageErrorKind::Type)]
    #[case(json!({"Type": "Request"}), Some("Offer"), MessageErrorKind::Type)]
    #[case(json!(["Offer"]), Some("Offer"), MessageErrorKind::Value)]
    fn discriminator_is_checked_on_raw_payloads(
        #[case] json: Value,
        #[case] expected_type: Option<&str>,
        #[case] kind: MessageErrorKind,
    ) {
        let error = Envelope::check_discriminator(&json, expected_type).expect_err("rejected");
        assert_eq!(error.kind(), kind);
    }

    #[rstest]
    fn discriminator_accepts_expected_type(payload: Value) {
        assert_eq!(Envelope::check_discriminator(&payload, Some("Offer")), Ok(()));
    }

    #[rstest]
    fn type_check_can_be_skipped(mut payload: Value) {
        payload["Type"] = json!("Request");
        assert!(envelope_from(&payload, None).is_ok());
    }

    #[rstest]
    fn serializes_through_the_result_schema(mut payload: Value) {
        payload["Warnings"] = json!(["warning.input"]);
        let envelope = envelope_from(&payload, None).expect("valid envelope");
        let json = ABSTRACT_RESULT_MESSAGE_SCHEMA
            .serialize(|internal_name| envelope.attribute_value(internal_name));
        assert_eq!(json, payload);
    }

    #[rstest]
    fn setters_keep_previous_value_on_failure(payload: Value) {
        let mut envelope = envelope_from(&payload, None).expect("valid envelope");
        assert!(envelope.set_epoch_number(2.5).is_err());
        assert_eq!(envelope.epoch_number(), 1);
        assert!(envelope.set_timestamp("soon").is_err());
        assert_eq!(envelope.timestamp(), "2020-01-01T00:00:10.000Z");
        assert!(envelope.set_warnings(Some(Vec::new())).is_err());
        assert_eq!(envelope.warnings(), None);
    }
}
