//! Shared payload fixtures for message tests.

use rstest::fixture;
use serde_json::{Value, json};

/// Returns a valid envelope for the given discriminator.
pub fn envelope(message_type: &str) -> Value {
    json!({
        "Type": message_type,
        "SimulationId": "2020-01-01T00:00:00.000Z",
        "SourceProcessId": "Storage1",
        "MessageId": "Storage1-12",
        "Timestamp": "2020-01-01T00:00:10.000Z",
        "EpochNumber": 7,
        "TriggeringMessageIds": ["Manager-7"]
    })
}

/// Returns `base` with every attribute of `fields` added or replaced.
pub fn with_fields(mut base: Value, fields: Value) -> Value {
    if let (Some(target), Value::Object(source)) = (base.as_object_mut(), fields) {
        target.extend(source);
    }
    base
}

/// Returns a valid power block with `points` hourly values.
pub fn power_block(points: u32, name: &str) -> Value {
    let time_index: Vec<String> = (1..=points)
        .map(|hour| format!("2020-01-01T{hour:02}:00:00.000Z"))
        .collect();
    let values: Vec<f64> = (1..=points).map(f64::from).collect();
    json!({
        "TimeIndex": time_index,
        "Series": {name: {"Values": values, "UnitOfMeasure": "kW"}}
    })
}

#[fixture]
pub fn offer_payload() -> Value {
    with_fields(
        envelope("Offer"),
        json!({
            "ActivationTime": "2020-01-01T01:00:00.000Z",
            "Duration": {"Value": 60.0, "UnitOfMeasure": "Minute"},
            "Direction": "upregulation",
            "RealPower": power_block(2, "Regulation"),
            "Price": {"Value": 2.5, "UnitOfMeasure": "{EUR}/(kW.h)"},
            "CongestionId": "XYZ",
            "OfferId": "Storage1-1",
            "OfferCount": 1
        }),
    )
}

#[fixture]
pub fn request_payload() -> Value {
    with_fields(
        envelope("Request"),
        json!({
            "ActivationTime": "2020-01-01T01:00:00.000Z",
            "Duration": {"Value": 30.0, "UnitOfMeasure": "Minute"},
            "Direction": "downregulation",
            "RealPowerMin": {"Value": 100.0, "UnitOfMeasure": "kW"},
            "RealPowerRequest": {"Value": 250.0, "UnitOfMeasure": "kW"},
            "CustomerIds": ["c1", "c2"],
            "CongestionId": "XYZ",
            "BidResolution": {"Value": 50.0, "UnitOfMeasure": "kW"}
        }),
    )
}

#[fixture]
pub fn forecast_payload() -> Value {
    with_fields(
        envelope("ResourceForecast.Power"),
        json!({
            "ResourceName": "Load1",
            "Forecast": power_block(3, "RealPower")
        }),
    )
}

#[fixture]
pub fn market_result_payload() -> Value {
    with_fields(
        envelope("LFMMarketResult"),
        json!({
            "ActivationTime": "2020-01-01T01:00:00.000Z",
            "Duration": {"Value": 60.0, "UnitOfMeasure": "Minute"},
            "Direction": "upregulation",
            "RealPower": power_block(2, "Regulation"),
            "Price": {"Value": 12.0, "UnitOfMeasure": "EUR"},
            "CongestionId": "XYZ",
            "OfferId": "Storage1-1",
            "ResultCount": 1,
            "CustomerIds": ["c1"]
        }),
    )
}
