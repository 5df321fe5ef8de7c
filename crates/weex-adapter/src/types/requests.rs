/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{MarginMode, OrderSide, SeparatedMode};

/// POST /api/uni/v3/order/placeOrder
///
/// `match_price` selects execution style: "1" market, "0" limit. A market
/// order transmits an empty `price` string, mirroring the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub symbol: String,
    pub client_oid: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// "0" for a normal order; plan/trigger orders use other codes
    pub order_type: String,
    pub match_price: String,
    pub price: String,
    #[serde(rename = "marginMode")]
    pub margin_mode: MarginMode,
    #[serde(rename = "separatedMode")]
    pub separated_mode: SeparatedMode,
}

impl PlaceOrderRequest {
    pub fn market(symbol: impl Into<String>, side: OrderSide, size: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            client_oid: Self::client_oid(side),
            size,
            side,
            order_type: "0".to_string(),
            match_price: "1".to_string(),
            price: String::new(),
            margin_mode: MarginMode::Shared,
            separated_mode: SeparatedMode::Combined,
        }
    }

    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        size: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            client_oid: Self::client_oid(side),
            size,
            side,
            order_type: "0".to_string(),
            match_price: "0".to_string(),
            price: price.to_string(),
            margin_mode: MarginMode::Shared,
            separated_mode: SeparatedMode::Combined,
        }
    }

    fn client_oid(side: OrderSide) -> String {
        format!("ai_{}_{}", side.code(), chrono::Utc::now().timestamp_millis())
    }
}

/// POST /api/uni/v3/order/cancelOrder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<String>,
}

/// POST /api/uni/v3/account/setLeverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLeverageRequest {
    pub symbol: String,
    pub leverage: u32,
    #[serde(rename = "marginMode")]
    pub margin_mode: MarginMode,
}

/// POST /api/uni/v3/account/changeHoldModel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeHoldModelRequest {
    pub symbol: String,
    #[serde(rename = "marginMode")]
    pub margin_mode: MarginMode,
    #[serde(rename = "separatedMode")]
    pub separated_mode: SeparatedMode,
}

/// POST /api/uni/v3/account/transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub coin: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(rename = "fromType")]
    pub from_type: String,
    #[serde(rename = "toType")]
    pub to_type: String,
}

/// POST /api/uni/v3/ai/uploadAiLog
///
/// Decision-cycle record for the exchange's audit-log endpoint. `input` and
/// `output` are free-form JSON documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiLogUpload {
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
    pub stage: String,
    pub model: String,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
    pub explanation: String,
}
