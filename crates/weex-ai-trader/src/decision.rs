/*
[INPUT]:  Raw completion text from the model
[OUTPUT]: Validated trading decision ready for execution
[POS]:    Decision layer - model output contract
[UPDATE]: When the decision JSON contract changes
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use weex_adapter::{OrderSide, PriceKind};

/// What the model wants done this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradingAction {
    Hold,
    OpenLong,
    OpenShort,
    CloseLong,
    CloseShort,
    AddLong,
    AddShort,
}

impl TradingAction {
    /// Actions other than `Hold` are expected to carry orders.
    pub fn expects_orders(self) -> bool {
        !matches!(self, TradingAction::Hold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Narrative section of the decision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub market_trend: String,
    pub position_status: String,
    pub risk_assessment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingSignal {
    pub action: TradingAction,
    pub confidence: Confidence,
    pub reasoning: String,
}

/// One executable order inside the decision. `side` carries the wire code
/// ("1".."4") and is deserialized straight into the adapter enum. Every
/// order states a price; for market orders it is a reference quote only
/// and is dropped when the exchange request is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInstruction {
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub type_description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
    pub price_type: PriceKind,
    /// Limit price; empty string for market orders
    #[serde(default)]
    pub price: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlan {
    pub has_order: bool,
    #[serde(default)]
    pub orders: Vec<OrderInstruction>,
}

/// Complete decision document as emitted by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingDecision {
    pub analysis: MarketAnalysis,
    pub signal: TradingSignal,
    pub execution: ExecutionPlan,
    #[serde(default)]
    pub risk_warning: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("completion contained no JSON object")]
    NoJsonFound,
    #[error("failed to parse decision JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("decision failed validation: {0}")]
    Invalid(String),
}

impl TradingDecision {
    /// Parse a completion into a validated decision. Models frequently wrap
    /// the JSON in markdown fences or prose, so the first balanced object
    /// in the text is extracted before parsing.
    pub fn parse(completion: &str) -> Result<Self, DecisionError> {
        let json = extract_json_object(completion).ok_or(DecisionError::NoJsonFound)?;
        let decision: Self = serde_json::from_str(json)?;
        decision.validate()?;
        Ok(decision)
    }

    /// Consistency checks between the signal and the execution plan. A plan
    /// that claims `hasOrder: false` but still carries orders is rejected
    /// rather than silently executed.
    pub fn validate(&self) -> Result<(), DecisionError> {
        let invalid = |message: String| Err(DecisionError::Invalid(message));

        if !self.execution.has_order && !self.execution.orders.is_empty() {
            return invalid(format!(
                "hasOrder is false but {} orders are present",
                self.execution.orders.len()
            ));
        }
        if self.execution.has_order && self.execution.orders.is_empty() {
            return invalid("hasOrder is true but the order list is empty".to_string());
        }
        if self.execution.has_order && !self.signal.action.expects_orders() {
            return invalid("HOLD signal must not carry orders".to_string());
        }

        for (index, order) in self.execution.orders.iter().enumerate() {
            if order.size <= Decimal::ZERO {
                return invalid(format!("order {index}: size must be positive"));
            }
            if order.price.is_empty() {
                return invalid(format!("order {index}: order is missing a price"));
            }
            // Only a limit price reaches the exchange; market orders keep
            // their price as a reference quote.
            if order.price_type == PriceKind::Limit {
                let price: Decimal = order.price.parse().map_err(|_| {
                    DecisionError::Invalid(format!(
                        "order {index}: limit order price {:?} is not numeric",
                        order.price
                    ))
                })?;
                if price <= Decimal::ZERO {
                    return invalid(format!("order {index}: limit price must be positive"));
                }
            }
        }
        Ok(())
    }
}

/// Locate the first balanced `{...}` object in the text, ignoring braces
/// inside JSON string literals.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
