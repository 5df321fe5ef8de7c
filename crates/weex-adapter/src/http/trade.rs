/*
[INPUT]:  Order/configuration requests with signed bodies
[OUTPUT]: Order responses and configuration acknowledgements
[POS]:    HTTP layer - trading endpoints (signed POST)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use crate::http::{Result, WeexClient};
use crate::types::{
    ApiAck, CancelOrderRequest, CancelOrderResponse, ChangeHoldModelRequest,
    ChangeLeverageRequest, MarginMode, OrderSide, PlaceOrderRequest, PlaceOrderResponse,
    PositionSide, SeparatedMode, TransferRequest,
};
use rust_decimal::Decimal;

impl WeexClient {
    /// Place an order
    ///
    /// POST /api/uni/v3/order/placeOrder
    pub async fn place_order(&self, req: &PlaceOrderRequest) -> Result<PlaceOrderResponse> {
        self.post_signed("/api/uni/v3/order/placeOrder", req).await
    }

    /// Cancel an order by exchange id or client id
    ///
    /// POST /api/uni/v3/order/cancelOrder
    pub async fn cancel_order(&self, req: &CancelOrderRequest) -> Result<CancelOrderResponse> {
        self.post_signed("/api/uni/v3/order/cancelOrder", req).await
    }

    /// Change leverage for a pair
    ///
    /// POST /api/uni/v3/account/setLeverage
    pub async fn change_leverage(
        &self,
        symbol: &str,
        leverage: u32,
        margin_mode: MarginMode,
    ) -> Result<ApiAck> {
        let req = ChangeLeverageRequest {
            symbol: symbol.to_string(),
            leverage,
            margin_mode,
        };
        self.post_signed("/api/uni/v3/account/setLeverage", &req).await
    }

    /// Switch margin/position bookkeeping mode for a pair. The exchange
    /// rejects the switch while positions are open.
    ///
    /// POST /api/uni/v3/account/changeHoldModel
    pub async fn change_hold_model(
        &self,
        symbol: &str,
        margin_mode: MarginMode,
        separated_mode: SeparatedMode,
    ) -> Result<ApiAck> {
        let req = ChangeHoldModelRequest {
            symbol: symbol.to_string(),
            margin_mode,
            separated_mode,
        };
        self.post_signed("/api/uni/v3/account/changeHoldModel", &req)
            .await
    }

    /// Move funds between account types
    ///
    /// POST /api/uni/v3/account/transfer
    pub async fn transfer(&self, req: &TransferRequest) -> Result<ApiAck> {
        self.post_signed("/api/uni/v3/account/transfer", req).await
    }

    /// Simplified helper: open a position at market price
    pub async fn open_position(
        &self,
        symbol: &str,
        size: Decimal,
        side: PositionSide,
    ) -> Result<PlaceOrderResponse> {
        let order_side = match side {
            PositionSide::Long => OrderSide::OpenLong,
            PositionSide::Short => OrderSide::OpenShort,
        };
        self.place_order(&PlaceOrderRequest::market(symbol, order_side, size))
            .await
    }

    /// Simplified helper: close a position at market price
    pub async fn close_position(
        &self,
        symbol: &str,
        size: Decimal,
        side: PositionSide,
    ) -> Result<PlaceOrderResponse> {
        let order_side = match side {
            PositionSide::Long => OrderSide::CloseLong,
            PositionSide::Short => OrderSide::CloseShort,
        };
        self.place_order(&PlaceOrderRequest::market(symbol, order_side, size))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{Credentials, WeexClient, WeexError};
    use crate::types::{MarginMode, OrderSide, PlaceOrderRequest, PositionSide, SeparatedMode};
    use wiremock::matchers::{body_partial_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn signed_client(server: &MockServer) -> WeexClient {
        WeexClient::new(
            Credentials::new("test-key", "test-secret", "test-pass"),
            &server.uri(),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_place_order_signed_body() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/uni/v3/order/placeOrder"))
            .and(header_exists("ACCESS-SIGN"))
            .and(body_partial_json(serde_json::json!({
                "symbol": "cmt_btcusdt",
                "type": "2",
                "match_price": "1",
                "price": "",
                "marginMode": 1,
                "separatedMode": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"order_id":"1234567890","client_oid":"ai_2_1700000000000"}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_client(&server);
        let req = PlaceOrderRequest::market("cmt_btcusdt", OrderSide::OpenShort, "0.005".parse().unwrap());
        let resp = client.place_order(&req).await.expect("place_order failed");
        assert_eq!(resp.order_id, "1234567890");
    }

    #[tokio::test]
    async fn test_open_position_uses_open_long_code() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/uni/v3/order/placeOrder"))
            .and(body_partial_json(serde_json::json!({"type": "1"})))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"order_id":"42"}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_client(&server);
        client
            .open_position("cmt_btcusdt", "0.001".parse().unwrap(), PositionSide::Long)
            .await
            .expect("open_position failed");
    }

    #[tokio::test]
    async fn test_change_hold_model_ack() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/uni/v3/account/changeHoldModel"))
            .and(body_partial_json(serde_json::json!({
                "symbol": "cmt_btcusdt",
                "marginMode": 1,
                "separatedMode": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"code":"00000","msg":"success","requestTime":1700000000000}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = signed_client(&server);
        let ack = client
            .change_hold_model("cmt_btcusdt", MarginMode::Shared, SeparatedMode::Combined)
            .await
            .expect("change_hold_model failed");
        assert!(ack.is_success());
    }

    #[tokio::test]
    async fn test_order_rejected_without_credentials() {
        let server = MockServer::start().await;
        let client = WeexClient::new(Credentials::read_only(), &server.uri()).expect("client init");
        let req = PlaceOrderRequest::market("cmt_btcusdt", OrderSide::OpenLong, "0.001".parse().unwrap());
        let err = client.place_order(&req).await.unwrap_err();
        assert!(matches!(err, WeexError::MissingCredentials { .. }));
    }
}
