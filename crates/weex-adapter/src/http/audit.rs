/*
[INPUT]:  Decision-cycle records (stage, model, input, output, explanation)
[OUTPUT]: Acknowledgement codes from the exchange audit-log endpoint
[POS]:    HTTP layer - best-effort AI audit-log upload (signed POST)
[UPDATE]: When the audit-log payload or acknowledgement format changes
*/

use crate::http::{Result, WeexClient};
use crate::types::{AiLogResponse, AiLogUpload};

impl WeexClient {
    /// Upload one decision-cycle record to the exchange audit log.
    ///
    /// POST /api/uni/v3/ai/uploadAiLog
    ///
    /// The endpoint acknowledges with code "00000" on success. Callers
    /// treat this as best-effort; a failure here never classifies a
    /// trading cycle as failed.
    pub async fn upload_ai_log(&self, log: &AiLogUpload) -> Result<AiLogResponse> {
        self.post_signed("/api/uni/v3/ai/uploadAiLog", log).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{Credentials, WeexClient};
    use crate::types::AiLogUpload;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_upload_ai_log_ack() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/uni/v3/ai/uploadAiLog"))
            .and(body_partial_json(serde_json::json!({
                "stage": "live",
                "model": "deepseek/deepseek-r1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"code":"00000","msg":"success","data":null}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = WeexClient::new(
            Credentials::new("test-key", "test-secret", "test-pass"),
            &server.uri(),
        )
        .expect("client init");

        let log = AiLogUpload {
            order_id: None,
            stage: "live".to_string(),
            model: "deepseek/deepseek-r1".to_string(),
            input: serde_json::json!({"marketReport": "..."}),
            output: serde_json::json!({"signal": {"action": "HOLD"}}),
            explanation: "no actionable signal".to_string(),
        };
        let ack = client.upload_ai_log(&log).await.expect("upload failed");
        assert!(ack.is_success());
    }
}
