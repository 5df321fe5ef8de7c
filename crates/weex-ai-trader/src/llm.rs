/*
[INPUT]:  Market report text and completion API configuration
[OUTPUT]: Validated trading decision from the model
[POS]:    Decision layer - completion API client
[UPDATE]: When changing the provider, prompt framing, or request shape
*/

use crate::decision::{DecisionError, TradingDecision};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(120);

/// Why no decision came back. `BadCompletion` keeps the raw completion so
/// the cycle can persist it for postmortems.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("completion request failed: {0}")]
    Request(anyhow::Error),
    #[error("completion could not be used as a decision: {source}")]
    BadCompletion {
        raw: String,
        #[source]
        source: DecisionError,
    },
}

impl ProviderError {
    /// The raw completion text, when one was obtained at all
    pub fn raw_completion(&self) -> Option<&str> {
        match self {
            ProviderError::BadCompletion { raw, .. } => Some(raw),
            ProviderError::Request(_) => None,
        }
    }
}

/// Produces a trading decision for a market report. The pipeline only sees
/// this trait, so tests substitute a scripted provider.
#[async_trait]
pub trait SignalProvider: Send + Sync {
    async fn decide(&self, market_report: &str) -> Result<TradingDecision, ProviderError>;

    /// Model identifier recorded in artifacts and audit uploads
    fn model_id(&self) -> &str;
}

/// OpenAI-compatible chat-completions client pointed at OpenRouter
pub struct OpenRouterProvider {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenRouterProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f64,
    ) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(COMPLETION_TIMEOUT)
            .build()
            .context("build completion http client")?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
        })
    }

    fn build_prompt(market_report: &str) -> String {
        format!(
            "You are a disciplined cryptocurrency futures trading assistant.\n\
             Analyze the market report below and decide on at most one action \
             for this cycle.\n\n{market_report}\n\n\
             Respond with a single JSON object and nothing else, using exactly \
             this shape:\n\
             {{\n\
               \"analysis\": {{\"marketTrend\": \"...\", \"positionStatus\": \"...\", \"riskAssessment\": \"...\"}},\n\
               \"signal\": {{\"action\": \"HOLD|OPEN_LONG|OPEN_SHORT|CLOSE_LONG|CLOSE_SHORT|ADD_LONG|ADD_SHORT\", \"confidence\": \"HIGH|MEDIUM|LOW\", \"reasoning\": \"...\"}},\n\
               \"execution\": {{\"hasOrder\": true, \"orders\": [{{\"type\": \"1|2|3|4\", \"typeDescription\": \"...\", \"size\": \"0.001\", \"priceType\": \"MARKET|LIMIT\", \"price\": \"91000.0\", \"reasoning\": \"...\"}}]}},\n\
               \"riskWarning\": \"...\"\n\
             }}\n\
             Rules: order type 1=open long, 2=open short, 3=close long, \
             4=close short. size and price are decimal strings; every order \
             states a price, and for MARKET orders it is the reference \
             quote. When the action is HOLD, hasOrder must be false and \
             orders must be empty."
        )
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(%url, model = %self.model, "requesting completion");
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("send completion request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("completion API returned {status}: {body}");
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("decode completion response")?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .context("completion response contained no choices")?;
        Ok(choice.message.content)
    }
}

#[async_trait]
impl SignalProvider for OpenRouterProvider {
    async fn decide(&self, market_report: &str) -> Result<TradingDecision, ProviderError> {
        let prompt = Self::build_prompt(market_report);
        let completion = self
            .complete(&prompt)
            .await
            .map_err(ProviderError::Request)?;
        debug!(completion_bytes = completion.len(), "completion received");
        TradingDecision::parse(&completion).map_err(|source| ProviderError::BadCompletion {
            raw: completion,
            source,
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
    }

    const DECISION_JSON: &str = r#"{
        "analysis": {"marketTrend": "up", "positionStatus": "flat", "riskAssessment": "low"},
        "signal": {"action": "HOLD", "confidence": "LOW", "reasoning": "chop"},
        "execution": {"hasOrder": false, "orders": []},
        "riskWarning": "volatile"
    }"#;

    #[tokio::test]
    async fn test_decide_posts_chat_completion_with_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(
                serde_json::json!({"model": "deepseek/deepseek-r1", "temperature": 0.7}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(DECISION_JSON)))
            .expect(1)
            .mount(&server)
            .await;

        let provider =
            OpenRouterProvider::new(server.uri(), "test-key", "deepseek/deepseek-r1", 0.7)
                .unwrap();
        let decision = provider.decide("# Market report").await.unwrap();
        assert_eq!(decision.signal.action, crate::decision::TradingAction::Hold);
    }

    #[tokio::test]
    async fn test_fenced_completion_is_parsed() {
        let server = MockServer::start().await;
        let fenced = format!("```json\n{DECISION_JSON}\n```");
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&fenced)))
            .mount(&server)
            .await;

        let provider = OpenRouterProvider::new(server.uri(), "k", "m", 0.7).unwrap();
        assert!(provider.decide("report").await.is_ok());
    }

    #[tokio::test]
    async fn test_api_error_surfaces_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let provider = OpenRouterProvider::new(server.uri(), "k", "m", 0.7).unwrap();
        let err = provider.decide("report").await.unwrap_err();
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_unparseable_completion_keeps_raw_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("I would simply hold here.")),
            )
            .mount(&server)
            .await;

        let provider = OpenRouterProvider::new(server.uri(), "k", "m", 0.7).unwrap();
        let err = provider.decide("report").await.unwrap_err();
        assert_eq!(err.raw_completion(), Some("I would simply hold here."));
    }

    #[tokio::test]
    async fn test_transport_failure_has_no_raw_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = OpenRouterProvider::new(server.uri(), "k", "m", 0.7).unwrap();
        let err = provider.decide("report").await.unwrap_err();
        assert_eq!(err.raw_completion(), None);
    }

    #[tokio::test]
    async fn test_empty_choices_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let provider = OpenRouterProvider::new(server.uri(), "k", "m", 0.7).unwrap();
        assert!(provider.decide("report").await.is_err());
    }
}
