//! Unit tests for local flexibility market results.

use super::fixtures::{envelope, market_result_payload, with_fields};
use crate::message::{
    domain::{CustomerIdsInput, Direction, LfmMarketResultMessage, QuantityBlock},
    error::MessageError,
    ports::message_type::MessageType,
};
use rstest::rstest;
use serde_json::{Value, json};

fn market_result(payload: &Value) -> LfmMarketResultMessage {
    LfmMarketResultMessage::try_from_json(payload).expect("valid market result")
}

#[rstest]
fn round_trips_canonical_payload(market_result_payload: Value) {
    let message = market_result(&market_result_payload);
    assert_eq!(message.direction(), Some(Direction::Upregulation));
    assert_eq!(message.result_count(), 1);
    assert_eq!(message.to_json(), market_result_payload);
}

#[rstest]
fn only_result_count_is_required() {
    let payload = with_fields(envelope("LFMMarketResult"), json!({"ResultCount": 0}));
    let message = market_result(&payload);
    assert_eq!(message.activation_time(), None);
    assert_eq!(message.price(), None);
    assert_eq!(message.customer_ids(), None);
    assert_eq!(message.to_json(), payload);

    let missing = envelope("LFMMarketResult");
    assert!(LfmMarketResultMessage::from_json(&missing).is_none());
}

#[rstest]
fn price_accepts_only_eur(market_result_payload: Value) {
    let mut message = market_result(&market_result_payload);
    message.set_price(3.0).expect("bare price");
    assert_eq!(
        message.price(),
        Some(&QuantityBlock::new(3.0, "EUR").expect("valid block"))
    );

    let error = message
        .set_price(QuantityBlock::new(3.0, "{EUR}/(kW.h)").expect("valid block"))
        .expect_err("unsupported unit");
    assert!(matches!(error, MessageError::UnitValue(_)));
}

#[rstest]
#[case("CongestionId")]
#[case("OfferId")]
fn present_identifiers_must_not_be_empty(market_result_payload: Value, #[case] attribute: &str) {
    let payload = with_fields(market_result_payload, json!({attribute: ""}));
    let error = LfmMarketResultMessage::try_from_json(&payload).expect_err("empty identifier");
    assert!(matches!(error, MessageError::Value(_)));
}

#[rstest]
fn optional_fields_can_be_cleared(market_result_payload: Value) {
    let mut message = market_result(&market_result_payload);
    message.set_direction(None).expect("clear direction");
    message.set_offer_id(None).expect("clear offer id");
    message
        .set_customer_ids(CustomerIdsInput::Missing)
        .expect("clear customers");
    let json = message.to_json();
    assert!(json.get("Direction").is_none());
    assert!(json.get("OfferId").is_none());
    assert!(json.get("CustomerIds").is_none());
}

#[rstest]
fn customer_ids_must_not_be_empty_when_given(market_result_payload: Value) {
    let payload = with_fields(market_result_payload, json!({"CustomerIds": []}));
    let error = LfmMarketResultMessage::try_from_json(&payload).expect_err("empty list");
    assert!(matches!(error, MessageError::Value(_)));
}

#[rstest]
fn result_count_rejects_fractions(market_result_payload: Value) {
    let mut message = market_result(&market_result_payload);
    let error = message.set_result_count(1.5).expect_err("fractional");
    assert!(matches!(error, MessageError::Value(_)));
    assert_eq!(message.result_count(), 1);
}
