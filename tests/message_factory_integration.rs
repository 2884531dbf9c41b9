//! Behavioural integration tests for building messages through the
//! registry.
//!
//! These tests exercise end-to-end scenarios from an untyped payload to a
//! validated message and back to JSON.

use domain_messages::message::{
    domain::{Message, OfferMessage, QuantityBlock},
    error::MessageError,
    ports::message_type::{MessageType, ValidationConfig},
    registry::{MessageRegistry, registry},
};
use serde_json::{Value, json};

fn envelope(message_type: &str) -> Value {
    json!({
        "Type": message_type,
        "SimulationId": "2020-06-03T04:00:00.000Z",
        "SourceProcessId": "FlexProvider",
        "MessageId": "FlexProvider-41",
        "Timestamp": "2020-06-03T04:00:05.000Z",
        "EpochNumber": 3,
        "TriggeringMessageIds": ["GridOperator-17"]
    })
}

fn offer_payload() -> Value {
    let mut payload = envelope("Offer");
    if let Some(object) = payload.as_object_mut() {
        object.extend([
            ("ActivationTime".to_owned(), json!("2020-06-03T05:00:00.000Z")),
            ("Duration".to_owned(), json!(45)),
            ("Direction".to_owned(), json!("upregulation")),
            (
                "RealPower".to_owned(),
                json!({
                    "TimeIndex": ["2020-06-03T05:00:00.000Z", "2020-06-03T05:15:00.000Z"],
                    "Series": {"Regulation": {"Values": [200.0, 180.0], "UnitOfMeasure": "kW"}}
                }),
            ),
            ("Price".to_owned(), json!(2.0)),
            ("CongestionId".to_owned(), json!("Congestion-9")),
            ("OfferId".to_owned(), json!("FlexProvider-Offer-1")),
            ("OfferCount".to_owned(), json!(1)),
        ]);
    }
    payload
}

// ============================================================================
// Scenario: Registry dispatches on the discriminator
// ============================================================================

/// When a payload names a registered type, the registry builds that type.
#[test]
fn offer_payload_builds_an_offer() {
    // Arrange
    let payload = offer_payload();

    // Act
    let message = registry().build(&payload);

    // Assert
    let Some(Message::Offer(offer)) = &message else {
        panic!("expected an offer, got {message:?}");
    };
    assert_eq!(offer.offer_id(), "FlexProvider-Offer-1");
    assert_eq!(offer.envelope().epoch_number(), 3);
}

/// When a payload names an unknown type, no message is produced.
#[test]
fn unknown_type_yields_no_message() {
    let mut payload = offer_payload();
    payload["Type"] = json!("Unknown");

    assert!(registry().build(&payload).is_none());
}

/// When a registered type fails validation, the registry reports no message
/// while the direct path reports the specific error.
#[test]
fn invalid_payload_yields_no_message() {
    let mut payload = offer_payload();
    payload["Direction"] = json!("sideways");

    assert!(registry().build(&payload).is_none());
    let error = registry().try_build(&payload).expect_err("invalid direction");
    assert!(matches!(error, MessageError::Value(_)));
}

// ============================================================================
// Scenario: Offer price units
// ============================================================================

/// A bare price takes the default unit and can later be replaced with an
/// explicit price in the alternative unit.
#[test]
fn offer_price_defaults_unit_and_accepts_mwh() {
    // Arrange
    let mut offer = OfferMessage::try_from_json(&offer_payload()).expect("valid offer");

    // Assert default unit
    assert_eq!(offer.price().value(), 2.0);
    assert_eq!(offer.price().unit_of_measure(), "{EUR}/(kW.h)");

    // Act
    let in_mwh = QuantityBlock::new(2.0, "{EUR}/(MW.h)").expect("valid block");
    offer.set_price(in_mwh).expect("alternative unit accepted");

    // Assert
    assert_eq!(offer.price().value(), 2.0);
    assert_eq!(offer.price().unit_of_measure(), "{EUR}/(MW.h)");
}

// ============================================================================
// Scenario: Round trip through the registry
// ============================================================================

/// Canonical payloads survive a build and serialise cycle; bare quantities
/// come back with their unit.
#[test]
fn built_message_serialises_with_explicit_units() {
    let payload = offer_payload();
    let message = registry().build(&payload).expect("valid offer");

    let json = message.to_json();

    assert_eq!(message.message_type(), "Offer");
    assert_eq!(json["Duration"], json!({"Value": 45.0, "UnitOfMeasure": "Minute"}));
    assert_eq!(
        json["Price"],
        json!({"Value": 2.0, "UnitOfMeasure": "{EUR}/(kW.h)"})
    );
    assert_eq!(json["RealPower"], payload["RealPower"]);
    assert_eq!(registry().build(&json), Some(message));
}

// ============================================================================
// Scenario: Registry configuration
// ============================================================================

/// A strict registry refuses payloads carrying undeclared attributes.
#[test]
fn strict_registry_rejects_unknown_attributes() {
    let strict = MessageRegistry::with_config(ValidationConfig::strict());
    let mut payload = offer_payload();
    payload["Comment"] = json!("not part of an offer");

    assert!(registry().build(&payload).is_some());
    assert!(strict.build(&payload).is_none());
}

/// Registering a type twice leaves the first registration in place.
#[test]
fn registration_is_idempotent() {
    let local = MessageRegistry::empty();

    assert!(OfferMessage::register_to_factory(&local));
    assert!(!OfferMessage::register_to_factory(&local));
    assert_eq!(local.message_types(), vec!["Offer".to_owned()]);
    assert!(local.build(&offer_payload()).is_some());
}
