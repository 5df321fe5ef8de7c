/*
[INPUT]:  Query parameters and HMAC-signed authentication
[OUTPUT]: Account data (assets, positions)
[POS]:    HTTP layer - private account endpoints (signed GET)
[UPDATE]: When adding new account endpoints or changing query parameters
*/

use crate::http::{Result, WeexClient};
use crate::types::{AccountAsset, Position};

impl WeexClient {
    /// Query account asset balances
    ///
    /// GET /api/uni/v3/account/assets
    pub async fn account_assets(&self) -> Result<Vec<AccountAsset>> {
        self.get_signed("/api/uni/v3/account/assets", "").await
    }

    /// Query all open positions across pairs
    ///
    /// GET /api/uni/v3/position/allPosition
    pub async fn all_positions(&self) -> Result<Vec<Position>> {
        self.get_signed("/api/uni/v3/position/allPosition", "").await
    }

    /// Query open positions for one pair
    ///
    /// GET /api/uni/v3/position/singlePosition?symbol={symbol}
    pub async fn single_position(&self, symbol: &str) -> Result<Vec<Position>> {
        let query = format!("?symbol={symbol}");
        self.get_signed("/api/uni/v3/position/singlePosition", &query)
            .await
    }

    /// Simplified view: the position for one pair, if any. In combined
    /// hold mode the exchange reports at most one position per pair.
    pub async fn current_position(&self, symbol: &str) -> Result<Option<Position>> {
        let mut positions = self.single_position(symbol).await?;
        Ok(if positions.is_empty() {
            None
        } else {
            Some(positions.remove(0))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{Credentials, WeexClient};
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn signed_client(server: &MockServer) -> WeexClient {
        WeexClient::new(
            Credentials::new("test-key", "test-secret", "test-pass"),
            &server.uri(),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_single_position_signed_get() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/uni/v3/position/singlePosition"))
            .and(query_param("symbol", "cmt_btcusdt"))
            .and(header("ACCESS-KEY", "test-key"))
            .and(header("ACCESS-PASSPHRASE", "test-pass"))
            .and(header_exists("ACCESS-SIGN"))
            .and(header_exists("ACCESS-TIMESTAMP"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"[{
                    "id": "98765",
                    "symbol": "cmt_btcusdt",
                    "side": "LONG",
                    "size": "0.0050",
                    "leverage": 20,
                    "open_value": "456.13",
                    "unrealizePnl": "1.05"
                }]"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_client(&server);
        let position = client
            .current_position("cmt_btcusdt")
            .await
            .expect("current_position failed")
            .expect("position present");
        assert_eq!(position.size, "0.0050".parse().unwrap());
        assert_eq!(position.leverage, 20);
    }

    #[tokio::test]
    async fn test_current_position_empty_means_none() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/uni/v3/position/singlePosition"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
            .mount(&server)
            .await;

        let client = signed_client(&server);
        let position = client
            .current_position("cmt_btcusdt")
            .await
            .expect("current_position failed");
        assert!(position.is_none());
    }
}
