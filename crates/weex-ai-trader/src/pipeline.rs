/*
[INPUT]:  Exchange client, signal provider, and artifact root
[OUTPUT]: One executed trading cycle with its audit trail on disk
[POS]:    Loop layer - per-cycle orchestration
[UPDATE]: When changing cycle steps, order mapping, or audit uploads
*/

use crate::artifacts::CycleWorkspace;
use crate::decision::{OrderInstruction, TradingDecision};
use crate::llm::SignalProvider;
use anyhow::Context;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use weex_adapter::{AiLogUpload, PlaceOrderRequest, PriceKind, WeexClient};

/// Result of placing one order from the decision
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOutcome {
    pub client_oid: String,
    pub side: String,
    pub size: Decimal,
    pub price_type: String,
    pub order_id: Option<String>,
    pub error: Option<String>,
}

impl OrderOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything one cycle produced, persisted as execution.json
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleOutcome {
    pub symbol: String,
    pub dry_run: bool,
    pub action: String,
    pub orders: Vec<OrderOutcome>,
}

impl CycleOutcome {
    pub fn placed_count(&self) -> usize {
        self.orders.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.orders.len() - self.placed_count()
    }
}

/// Anything that can execute one trading cycle. The driver only depends on
/// this trait, so loop tests substitute a scripted runner.
#[async_trait::async_trait]
pub trait CycleRunner: Send + Sync {
    async fn run_cycle(&self, dry_run: bool) -> anyhow::Result<CycleOutcome>;
}

/// Runs one trading cycle end to end: report, decision, execution, audit.
pub struct Pipeline {
    client: Arc<WeexClient>,
    provider: Arc<dyn SignalProvider>,
    artifact_root: PathBuf,
    symbol: String,
}

impl Pipeline {
    pub fn new(
        client: Arc<WeexClient>,
        provider: Arc<dyn SignalProvider>,
        artifact_root: PathBuf,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            client,
            provider,
            artifact_root,
            symbol: symbol.into(),
        }
    }

    /// Place one order; a failure is captured in the outcome instead of
    /// aborting the remaining orders.
    async fn place_one(&self, order: &OrderInstruction) -> OrderOutcome {
        let request = match build_request(&self.symbol, order) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "order skipped");
                return OrderOutcome {
                    client_oid: String::new(),
                    side: order.side.describe().to_string(),
                    size: order.size,
                    price_type: format!("{:?}", order.price_type),
                    order_id: None,
                    error: Some(err.to_string()),
                };
            }
        };

        let client_oid = request.client_oid.clone();
        match self.client.place_order(&request).await {
            Ok(response) => {
                info!(
                    order_id = %response.order_id,
                    side = order.side.describe(),
                    size = %order.size,
                    "order placed"
                );
                OrderOutcome {
                    client_oid,
                    side: order.side.describe().to_string(),
                    size: order.size,
                    price_type: format!("{:?}", order.price_type),
                    order_id: Some(response.order_id),
                    error: None,
                }
            }
            Err(err) => {
                error!(error = %err, side = order.side.describe(), "order placement failed");
                OrderOutcome {
                    client_oid,
                    side: order.side.describe().to_string(),
                    size: order.size,
                    price_type: format!("{:?}", order.price_type),
                    order_id: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Upload the decision trail to the exchange audit endpoint without
    /// blocking the cycle; failures are logged and dropped.
    fn spawn_audit_upload(
        &self,
        report: &str,
        decision: &TradingDecision,
        outcomes: &[OrderOutcome],
    ) {
        let client = Arc::clone(&self.client);
        let upload = AiLogUpload {
            order_id: outcomes.iter().find_map(|o| o.order_id.clone()),
            stage: "decision".to_string(),
            model: self.provider.model_id().to_string(),
            input: serde_json::Value::String(report.to_string()),
            output: serde_json::to_value(decision).unwrap_or(serde_json::Value::Null),
            explanation: decision.signal.reasoning.clone(),
        };
        tokio::spawn(async move {
            match client.upload_ai_log(&upload).await {
                Ok(ack) if ack.is_success() => {
                    info!("audit log uploaded");
                }
                Ok(ack) => {
                    warn!(code = %ack.code, msg = %ack.msg, "audit upload rejected");
                }
                Err(err) => {
                    warn!(error = %err, "audit upload failed");
                }
            }
        });
    }
}

#[async_trait::async_trait]
impl CycleRunner for Pipeline {
    /// Execute one cycle. In dry-run mode (or without exchange credentials)
    /// every step runs except order placement and audit upload.
    async fn run_cycle(&self, dry_run: bool) -> anyhow::Result<CycleOutcome> {
        let workspace = CycleWorkspace::create(&self.artifact_root).await?;
        info!(dir = %workspace.dir().display(), symbol = %self.symbol, "cycle started");

        let report = self
            .client
            .market_report(&self.symbol)
            .await
            .context("assemble market report")?;
        workspace.write_market_report(&report).await?;

        let decision = match self.provider.decide(&report).await {
            Ok(decision) => decision,
            Err(err) => {
                // keep whatever the model said for the postmortem
                let raw = err.raw_completion().unwrap_or("(completion unavailable)");
                let _ = workspace.write_decision_error(raw, &err.to_string()).await;
                return Err(anyhow::Error::new(err).context("obtain trading decision"));
            }
        };
        workspace.write_decision(&decision).await?;
        info!(
            action = ?decision.signal.action,
            confidence = ?decision.signal.confidence,
            order_count = decision.execution.orders.len(),
            "decision received"
        );

        let execute = !dry_run && self.client.credentials().is_complete();
        if !execute {
            info!(dry_run, "skipping order placement");
        }

        let mut outcomes = Vec::with_capacity(decision.execution.orders.len());
        if execute {
            for order in &decision.execution.orders {
                outcomes.push(self.place_one(order).await);
            }
            self.spawn_audit_upload(&report, &decision, &outcomes);
        }

        let outcome = CycleOutcome {
            symbol: self.symbol.clone(),
            dry_run: !execute,
            action: format!("{:?}", decision.signal.action),
            orders: outcomes,
        };
        workspace.write_execution(&outcome).await?;
        info!(
            placed = outcome.placed_count(),
            failed = outcome.failed_count(),
            "cycle finished"
        );
        Ok(outcome)
    }
}

fn build_request(symbol: &str, order: &OrderInstruction) -> anyhow::Result<PlaceOrderRequest> {
    match order.price_type {
        PriceKind::Market => Ok(PlaceOrderRequest::market(symbol, order.side, order.size)),
        PriceKind::Limit => {
            let price: Decimal = order
                .price
                .parse()
                .with_context(|| format!("limit price {:?} is not numeric", order.price))?;
            Ok(PlaceOrderRequest::limit(symbol, order.side, order.size, price))
        }
    }
}
