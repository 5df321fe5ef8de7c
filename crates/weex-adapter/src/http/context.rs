/*
[INPUT]:  Symbol identifier plus market/account endpoint responses
[OUTPUT]: Human-readable market report handed to the decision collaborator
[POS]:    HTTP layer - market snapshot assembly for one trading cycle
[UPDATE]: When changing which data feeds the report or its rendering
*/

use crate::http::{Result, WeexClient};
use crate::types::{Candle, DepthBook, Granularity, Ticker};
use std::fmt::Write as _;
use tracing::debug;

const CANDLE_COUNT: u32 = 24;
const DEPTH_LEVELS: usize = 5;

impl WeexClient {
    /// Assemble the market report for one trading cycle: ticker, short- and
    /// medium-horizon candles, order-book depth, and (when credentials are
    /// present) positions and account assets. Returned as readable text so
    /// the decision collaborator can consume it directly.
    pub async fn market_report(&self, symbol: &str) -> Result<String> {
        let ticker = self.ticker(symbol).await?;
        let candles_5m = self.candles(symbol, Granularity::FiveMinutes, CANDLE_COUNT).await?;
        let candles_1h = self.candles(symbol, Granularity::OneHour, CANDLE_COUNT).await?;
        let depth = self.depth(symbol, 15).await?;

        let mut report = String::new();
        let _ = writeln!(report, "# Market report: {symbol}");
        let _ = writeln!(report);
        render_ticker(&mut report, &ticker);
        render_candles(&mut report, "5m candles (oldest first)", &candles_5m);
        render_candles(&mut report, "1h candles (oldest first)", &candles_1h);
        render_depth(&mut report, &depth);

        // Account sections only make sense with credentials; a read-only
        // client still produces a usable public report.
        if self.credentials().is_complete() {
            self.render_account_sections(&mut report, symbol).await?;
        } else {
            debug!("no credentials configured; skipping account sections of report");
        }

        Ok(report)
    }

    async fn render_account_sections(&self, report: &mut String, symbol: &str) -> Result<()> {
        let positions = self.single_position(symbol).await?;
        let assets = self.account_assets().await?;

        let _ = writeln!(report, "## Current position");
        if positions.is_empty() {
            let _ = writeln!(report, "no open position");
        } else {
            for position in &positions {
                let _ = writeln!(
                    report,
                    "- {:?} size={} leverage={}x open_value={} unrealized_pnl={}",
                    position.side,
                    position.size,
                    position.leverage,
                    position.open_value,
                    position.unrealize_pnl
                );
            }
        }
        let _ = writeln!(report);

        let _ = writeln!(report, "## Account assets");
        for asset in &assets {
            let _ = writeln!(
                report,
                "- {} available={} frozen={} equity={} unrealized_pnl={}",
                asset.coin, asset.available, asset.frozen, asset.equity, asset.unrealize_pnl
            );
        }
        let _ = writeln!(report);
        Ok(())
    }
}

fn render_ticker(report: &mut String, ticker: &Ticker) {
    let _ = writeln!(report, "## Ticker");
    let _ = writeln!(
        report,
        "last={} bid={} ask={} high_24h={} low_24h={} volume_24h={}",
        ticker.last,
        ticker.best_bid,
        ticker.best_ask,
        ticker.high_24h,
        ticker.low_24h,
        ticker.volume_24h
    );
    let _ = writeln!(report);
}

fn render_candles(report: &mut String, title: &str, candles: &[Candle]) {
    let _ = writeln!(report, "## {title}");
    for candle in candles {
        let _ = writeln!(
            report,
            "t={} o={} h={} l={} c={} v={}",
            candle.0,
            candle.open(),
            candle.high(),
            candle.low(),
            candle.close(),
            candle.volume()
        );
    }
    let _ = writeln!(report);
}

fn render_depth(report: &mut String, depth: &DepthBook) {
    let _ = writeln!(report, "## Order book (top {DEPTH_LEVELS})");
    let _ = writeln!(report, "asks:");
    for level in depth.asks.iter().take(DEPTH_LEVELS) {
        let _ = writeln!(report, "  {} x {}", level.price(), level.size());
    }
    let _ = writeln!(report, "bids:");
    for level in depth.bids.iter().take(DEPTH_LEVELS) {
        let _ = writeln!(report, "  {} x {}", level.price(), level.size());
    }
    let _ = writeln!(report);
}
