/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub order_id: String,
    #[serde(default)]
    pub client_oid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub client_oid: Option<String>,
    #[serde(default)]
    pub result: Option<bool>,
}

/// Generic acknowledgement envelope used by the account-configuration
/// endpoints (leverage, hold model, transfer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiAck {
    pub code: String,
    pub msg: String,
    #[serde(rename = "requestTime", default)]
    pub request_time: Option<i64>,
}

impl ApiAck {
    pub fn is_success(&self) -> bool {
        self.code == "00000"
    }
}

/// Acknowledgement from the AI audit-log endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiLogResponse {
    pub code: String,
    pub msg: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl AiLogResponse {
    pub fn is_success(&self) -> bool {
        self.code == "00000"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_success_code() {
        let ack: ApiAck =
            serde_json::from_str(r#"{"code":"00000","msg":"success","requestTime":1700000000000}"#)
                .unwrap();
        assert!(ack.is_success());

        let failed: ApiAck = serde_json::from_str(r#"{"code":"40015","msg":"bad symbol"}"#).unwrap();
        assert!(!failed.is_success());
        assert_eq!(failed.request_time, None);
    }
}
