//! Unit tests for validation configuration and schema composition.

use super::fixtures::{offer_payload, with_fields};
use crate::message::{
    domain::{OfferMessage, RequestMessage, ResourceForecastPowerMessage},
    error::MessageErrorKind,
    ports::message_type::{MessageType, ValidationConfig},
};
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
fn default_config_values() {
    let config = ValidationConfig::default();
    assert!(config.enforce_type_check);
    assert!(!config.reject_unknown_attributes);
}

#[rstest]
fn lenient_config_skips_type_check(offer_payload: Value) {
    let payload = with_fields(offer_payload, json!({"Type": "Offer.Copy"}));
    assert!(OfferMessage::try_from_json(&payload).is_err());
    let message = OfferMessage::try_from_json_with(&payload, &ValidationConfig::lenient())
        .expect("type check skipped");
    assert_eq!(message.envelope().message_type(), "Offer.Copy");
}

#[rstest]
fn lenient_config_still_requires_a_type(offer_payload: Value) {
    let payload = with_fields(offer_payload, json!({"Type": ""}));
    let error = OfferMessage::try_from_json_with(&payload, &ValidationConfig::lenient())
        .expect_err("empty type");
    assert_eq!(error.kind(), MessageErrorKind::Type);
}

#[rstest]
fn unknown_attributes_are_ignored_by_default(offer_payload: Value) {
    let payload = with_fields(offer_payload, json!({"Comment": "extra"}));
    let message = OfferMessage::try_from_json(&payload).expect("extra attribute ignored");
    assert!(message.to_json().get("Comment").is_none());
}

#[rstest]
fn strict_config_rejects_unknown_attributes(offer_payload: Value) {
    let payload = with_fields(offer_payload, json!({"Comment": "extra"}));
    let error = OfferMessage::try_from_json_with(&payload, &ValidationConfig::strict())
        .expect_err("unknown attribute");
    assert_eq!(error.kind(), MessageErrorKind::Value);
}

#[rstest]
fn schemas_extend_the_result_envelope() {
    for schema in [
        OfferMessage::schema(),
        RequestMessage::schema(),
        ResourceForecastPowerMessage::schema(),
    ] {
        assert_eq!(schema.internal_name("Type"), Some("message_type"));
        assert_eq!(schema.internal_name("EpochNumber"), Some("epoch_number"));
        assert!(schema.is_optional("Warnings"));
    }
    assert_eq!(OfferMessage::schema().time_series_attributes(), &["RealPower"]);
    assert_eq!(OfferMessage::schema().quantity_unit("Price"), Some("{EUR}/(kW.h)"));
    assert!(RequestMessage::schema().is_optional("BidResolution"));
    assert!(!RequestMessage::schema().is_optional("Duration"));
}
