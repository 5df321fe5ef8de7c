/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for weex-ai-trader tests

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use weex_ai_trader::decision::TradingDecision;
use weex_ai_trader::llm::{ProviderError, SignalProvider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Setup a mock exchange server with all public market endpoints mounted
pub async fn setup_exchange_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/capi/v2/market/ticker"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"symbol":"cmt_btcusdt","last":"91000","best_ask":"91005","best_bid":"90995","high_24h":"92000","low_24h":"89500","volume_24h":"1532.4"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/capi/v2/market/candles"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[["1700000000000","91000","91200","90800","91100","12.5","1138750"]]"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/capi/v2/market/depth"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"asks":[["91010","0.5"]],"bids":[["90990","1.2"]]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    server
}

/// Mount the signed account endpoints an executing cycle also touches
pub async fn mount_account_endpoints(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/uni/v3/position/singlePosition"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/uni/v3/account/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"coin":"USDT","available":"1000","frozen":"0","equity":"1000","unrealizePnl":"0"}]"#,
            "application/json",
        ))
        .mount(server)
        .await;
}

/// Scripted signal provider: returns the same decision every cycle and
/// counts how often it was asked.
pub struct ScriptedProvider {
    decision_json: String,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub fn new(decision_json: impl Into<String>) -> Self {
        Self {
            decision_json: decision_json.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl SignalProvider for ScriptedProvider {
    async fn decide(&self, _market_report: &str) -> Result<TradingDecision, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TradingDecision::parse(&self.decision_json).map_err(|source| {
            ProviderError::BadCompletion {
                raw: self.decision_json.clone(),
                source,
            }
        })
    }

    fn model_id(&self) -> &str {
        "scripted/test-model"
    }
}

/// Decision opening a long with `count` identical market orders
pub fn open_long_decision(count: usize) -> String {
    let order = r#"{"type":"1","typeDescription":"open long","size":"0.005","priceType":"MARKET","price":"92000.0","reasoning":"test"}"#;
    let orders = vec![order; count].join(",");
    format!(
        r#"{{
            "analysis": {{"marketTrend": "up", "positionStatus": "flat", "riskAssessment": "low"}},
            "signal": {{"action": "OPEN_LONG", "confidence": "HIGH", "reasoning": "test entry"}},
            "execution": {{"hasOrder": true, "orders": [{orders}]}},
            "riskWarning": "test"
        }}"#
    )
}

/// Decision holding with no orders
pub fn hold_decision() -> String {
    r#"{
        "analysis": {"marketTrend": "flat", "positionStatus": "flat", "riskAssessment": "low"},
        "signal": {"action": "HOLD", "confidence": "LOW", "reasoning": "chop"},
        "execution": {"hasOrder": false, "orders": []},
        "riskWarning": "test"
    }"#
    .to_string()
}
