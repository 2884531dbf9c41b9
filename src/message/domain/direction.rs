//! Regulation direction shared by offers, requests and market results.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Direction of a regulation offer or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Increase production or decrease consumption.
    Upregulation,
    /// Decrease production or increase consumption.
    Downregulation,
}

impl Direction {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upregulation => "upregulation",
            Self::Downregulation => "downregulation",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown direction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is not a valid direction")]
pub struct ParseDirectionError(pub String);

impl TryFrom<&str> for Direction {
    type Error = ParseDirectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "upregulation" => Ok(Self::Upregulation),
            "downregulation" => Ok(Self::Downregulation),
            _ => Err(ParseDirectionError(value.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("upregulation", Direction::Upregulation)]
    #[case("downregulation", Direction::Downregulation)]
    fn parses_wire_values(#[case] input: &str, #[case] expected: Direction) {
        assert_eq!(Direction::try_from(input), Ok(expected));
        assert_eq!(expected.to_string(), input);
        assert_eq!(json!(expected), json!(input));
    }

    #[rstest]
    #[case("")]
    #[case("Upregulation")]
    #[case("up")]
    fn rejects_other_strings(#[case] input: &str) {
        assert_eq!(
            Direction::try_from(input),
            Err(ParseDirectionError(input.to_owned()))
        );
    }
}
