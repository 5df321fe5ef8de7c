/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Order direction codes as the exchange encodes them on the wire:
/// "1" open long, "2" open short, "3" close long, "4" close short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    #[serde(rename = "1")]
    OpenLong,
    #[serde(rename = "2")]
    OpenShort,
    #[serde(rename = "3")]
    CloseLong,
    #[serde(rename = "4")]
    CloseShort,
}

impl OrderSide {
    pub fn code(self) -> &'static str {
        match self {
            OrderSide::OpenLong => "1",
            OrderSide::OpenShort => "2",
            OrderSide::CloseLong => "3",
            OrderSide::CloseShort => "4",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            OrderSide::OpenLong => "open long",
            OrderSide::OpenShort => "open short",
            OrderSide::CloseLong => "close long",
            OrderSide::CloseShort => "close short",
        }
    }

    /// True for the two variants that reduce an existing position
    pub fn is_close(self) -> bool {
        matches!(self, OrderSide::CloseLong | OrderSide::CloseShort)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceKind {
    Market,
    Limit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
}

/// Margin mode codes: 1 shared (cross), 2 isolated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MarginMode {
    Shared,
    Isolated,
}

impl From<MarginMode> for u8 {
    fn from(mode: MarginMode) -> u8 {
        match mode {
            MarginMode::Shared => 1,
            MarginMode::Isolated => 2,
        }
    }
}

impl TryFrom<u8> for MarginMode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(MarginMode::Shared),
            2 => Ok(MarginMode::Isolated),
            other => Err(format!("unknown margin mode code: {other}")),
        }
    }
}

/// Position bookkeeping codes: 1 combined, 2 separated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SeparatedMode {
    Combined,
    Separated,
}

impl From<SeparatedMode> for u8 {
    fn from(mode: SeparatedMode) -> u8 {
        match mode {
            SeparatedMode::Combined => 1,
            SeparatedMode::Separated => 2,
        }
    }
}

impl TryFrom<u8> for SeparatedMode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(SeparatedMode::Combined),
            2 => Ok(SeparatedMode::Separated),
            other => Err(format!("unknown separated mode code: {other}")),
        }
    }
}

/// Candle granularity accepted by the market endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::OneMinute => "1m",
            Granularity::FiveMinutes => "5m",
            Granularity::FifteenMinutes => "15m",
            Granularity::ThirtyMinutes => "30m",
            Granularity::OneHour => "1h",
            Granularity::FourHours => "4h",
            Granularity::OneDay => "1d",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_side_wire_codes() {
        assert_eq!(serde_json::to_string(&OrderSide::OpenLong).unwrap(), r#""1""#);
        assert_eq!(serde_json::to_string(&OrderSide::CloseShort).unwrap(), r#""4""#);
        let side: OrderSide = serde_json::from_str(r#""3""#).unwrap();
        assert_eq!(side, OrderSide::CloseLong);
    }

    #[test]
    fn test_margin_mode_numeric_codes() {
        assert_eq!(serde_json::to_string(&MarginMode::Shared).unwrap(), "1");
        let mode: SeparatedMode = serde_json::from_str("1").unwrap();
        assert_eq!(mode, SeparatedMode::Combined);
        assert!(serde_json::from_str::<MarginMode>("9").is_err());
    }

    #[test]
    fn test_price_kind_uppercase() {
        assert_eq!(serde_json::to_string(&PriceKind::Market).unwrap(), r#""MARKET""#);
        let kind: PriceKind = serde_json::from_str(r#""LIMIT""#).unwrap();
        assert_eq!(kind, PriceKind::Limit);
    }
}
