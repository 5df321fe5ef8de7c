/*
[INPUT]:  Symbol identifiers and query parameters
[OUTPUT]: Market data (server time, contracts, candles, depth, ticker)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::{Result, WeexClient};
use crate::types::{Candle, Contract, DepthBook, Granularity, ServerTime, Ticker};

impl WeexClient {
    /// Get server time
    ///
    /// GET /capi/v2/market/time
    pub async fn server_time(&self) -> Result<ServerTime> {
        self.get_public("/capi/v2/market/time", "").await
    }

    /// Get contract metadata, optionally filtered to one pair
    ///
    /// GET /capi/v2/market/contracts?symbol={symbol}
    pub async fn contracts(&self, symbol: Option<&str>) -> Result<Vec<Contract>> {
        let query = match symbol {
            Some(s) => format!("?symbol={s}"),
            None => String::new(),
        };
        self.get_public("/capi/v2/market/contracts", &query).await
    }

    /// Get the most recent candles
    ///
    /// GET /capi/v2/market/candles?symbol={symbol}&granularity={granularity}&limit={limit}
    pub async fn candles(
        &self,
        symbol: &str,
        granularity: Granularity,
        limit: u32,
    ) -> Result<Vec<Candle>> {
        let query = format!(
            "?symbol={symbol}&granularity={}&limit={limit}",
            granularity.as_str()
        );
        self.get_public("/capi/v2/market/candles", &query).await
    }

    /// Get candles for an explicit time range (millisecond bounds)
    ///
    /// GET /capi/v2/market/candles?symbol={symbol}&granularity={granularity}&startTime={start}&endTime={end}
    pub async fn candles_range(
        &self,
        symbol: &str,
        granularity: Granularity,
        start_time_ms: i64,
        end_time_ms: i64,
    ) -> Result<Vec<Candle>> {
        let query = format!(
            "?symbol={symbol}&granularity={}&startTime={start_time_ms}&endTime={end_time_ms}",
            granularity.as_str()
        );
        self.get_public("/capi/v2/market/candles", &query).await
    }

    /// Get order-book depth
    ///
    /// GET /capi/v2/market/depth?symbol={symbol}&limit={limit}
    pub async fn depth(&self, symbol: &str, limit: u32) -> Result<DepthBook> {
        let query = format!("?symbol={symbol}&limit={limit}");
        self.get_public("/capi/v2/market/depth", &query).await
    }

    /// Get the latest ticker snapshot
    ///
    /// GET /capi/v2/market/ticker?symbol={symbol}
    pub async fn ticker(&self, symbol: &str) -> Result<Ticker> {
        let query = format!("?symbol={symbol}");
        self.get_public("/capi/v2/market/ticker", &query).await
    }
}
