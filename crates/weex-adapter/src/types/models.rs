/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust data models mirroring the exchange wire format
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::PositionSide;

/// GET /capi/v2/market/time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerTime {
    /// Unix timestamp in seconds, decimal string
    pub epoch: String,
    /// ISO 8601 representation
    pub iso: String,
    /// Server timestamp in milliseconds
    pub timestamp: i64,
}

/// Contract metadata for one perpetual pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub symbol: String,
    pub underlying_index: String,
    pub quote_currency: String,
    pub coin: String,
    #[serde(rename = "forwardContractFlag")]
    pub forward_contract_flag: bool,
    #[serde(rename = "minLeverage")]
    pub min_leverage: u32,
    #[serde(rename = "maxLeverage")]
    pub max_leverage: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub tick_size: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub size_increment: Decimal,
    #[serde(rename = "makerFeeRate", with = "rust_decimal::serde::str")]
    pub maker_fee_rate: Decimal,
    #[serde(rename = "takerFeeRate", with = "rust_decimal::serde::str")]
    pub taker_fee_rate: Decimal,
    #[serde(rename = "minOrderSize", with = "rust_decimal::serde::str")]
    pub min_order_size: Decimal,
    #[serde(rename = "maxOrderSize", with = "rust_decimal::serde::str")]
    pub max_order_size: Decimal,
    #[serde(rename = "maxPositionSize", with = "rust_decimal::serde::str")]
    pub max_position_size: Decimal,
    #[serde(default)]
    pub delivery: Vec<String>,
}

/// One candle as the exchange returns it: an array of strings
/// [timestamp_ms, open, high, low, close, volume, turnover].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle(
    pub String,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
);

impl Candle {
    pub fn time_ms(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    pub fn open(&self) -> Decimal {
        self.1
    }

    pub fn high(&self) -> Decimal {
        self.2
    }

    pub fn low(&self) -> Decimal {
        self.3
    }

    pub fn close(&self) -> Decimal {
        self.4
    }

    pub fn volume(&self) -> Decimal {
        self.5
    }

    pub fn turnover(&self) -> Decimal {
        self.6
    }
}

/// One price level: [price, size]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel(
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
);

impl DepthLevel {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn size(&self) -> Decimal {
        self.1
    }
}

/// GET /capi/v2/market/depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthBook {
    pub asks: Vec<DepthLevel>,
    pub bids: Vec<DepthLevel>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// GET /capi/v2/market/ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub last: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub best_ask: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub best_bid: Decimal,
    #[serde(rename = "high_24h", with = "rust_decimal::serde::str")]
    pub high_24h: Decimal,
    #[serde(rename = "low_24h", with = "rust_decimal::serde::str")]
    pub low_24h: Decimal,
    #[serde(rename = "volume_24h", with = "rust_decimal::serde::str")]
    pub volume_24h: Decimal,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One open position as the position endpoints report it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    pub side: PositionSide,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
    pub leverage: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub open_value: Decimal,
    #[serde(rename = "unrealizePnl", with = "rust_decimal::serde::str")]
    pub unrealize_pnl: Decimal,
    #[serde(default)]
    pub margin_mode: Option<String>,
    #[serde(default)]
    pub separated_mode: Option<String>,
}

/// One asset row from the account assets endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAsset {
    pub coin: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub available: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub frozen: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub equity: Decimal,
    #[serde(rename = "unrealizePnl", with = "rust_decimal::serde::str")]
    pub unrealize_pnl: Decimal,
}
