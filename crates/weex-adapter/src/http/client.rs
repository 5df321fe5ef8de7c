/*
[INPUT]:  HTTP configuration (base URL, timeouts, credentials)
[OUTPUT]: Configured reqwest client issuing signed and public API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing signing/header behavior
*/

use crate::http::signature::RequestSigner;
use crate::http::{Result, WeexError};
use reqwest::{Client, Method, Url, header::HeaderMap, header::HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default base URL for the Weex contract API
pub const DEFAULT_BASE_URL: &str = "https://pro-openapi.weex.tech";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// API credentials. Empty strings are valid: public endpoints never consult
/// them, and private endpoints fail with `MissingCredentials` when invoked.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
    pub passphrase: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            passphrase: passphrase.into(),
        }
    }

    /// Credentials for read-only use of public endpoints
    pub fn read_only() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.secret_key.is_empty() && !self.passphrase.is_empty()
    }
}

/// Main HTTP client for the Weex contract API
#[derive(Debug)]
pub struct WeexClient {
    http_client: Client,
    base_url: Url,
    credentials: Credentials,
    signer: RequestSigner,
}

impl WeexClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials, base_url: &str) -> Result<Self> {
        Self::with_config(credentials, base_url, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(
        credentials: Credentials,
        base_url: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let signer = RequestSigner::new(credentials.secret_key.clone());

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            credentials,
            signer,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str, query: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("{path}{query}"))?)
    }

    /// The signed message is a plain concatenation, so the split between
    /// path and query must be pinned: the path never contains `?` and a
    /// non-empty query always carries its own leading `?`.
    fn check_path_query(path: &str, query: &str) -> Result<()> {
        if path.contains('?') {
            return Err(WeexError::Config(format!(
                "request path must not embed a query string: {path}"
            )));
        }
        if !query.is_empty() && !query.starts_with('?') {
            return Err(WeexError::Config(format!(
                "non-empty query string must start with '?': {query}"
            )));
        }
        Ok(())
    }

    fn require_credentials(&self, endpoint: &str) -> Result<()> {
        if self.credentials.is_complete() {
            Ok(())
        } else {
            Err(WeexError::MissingCredentials {
                endpoint: endpoint.to_string(),
            })
        }
    }

    /// Headers proving possession of the secret. The timestamp must be the
    /// same string used inside the signed message.
    fn auth_headers(&self, timestamp: &str, signature: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let parse = |value: &str| {
            HeaderValue::from_str(value)
                .map_err(|err| WeexError::Config(format!("invalid header value: {err}")))
        };
        headers.insert("ACCESS-KEY", parse(&self.credentials.api_key)?);
        headers.insert("ACCESS-SIGN", parse(signature)?);
        headers.insert("ACCESS-TIMESTAMP", parse(timestamp)?);
        headers.insert("ACCESS-PASSPHRASE", parse(&self.credentials.passphrase)?);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("locale", HeaderValue::from_static("en-US"));
        Ok(headers)
    }

    /// Unsigned GET against a public endpoint. No auth headers are attached
    /// and credentials are never consulted.
    pub(crate) async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
    ) -> Result<T> {
        Self::check_path_query(path, query)?;
        let url = self.url_for(path, query)?;
        debug!(%url, "public GET");
        let request = self.http_client.request(Method::GET, url);
        self.dispatch(request).await
    }

    /// Signed GET. The body is omitted from the signed message.
    pub(crate) async fn get_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
    ) -> Result<T> {
        Self::check_path_query(path, query)?;
        self.require_credentials(path)?;

        let timestamp = RequestSigner::timestamp_ms();
        let signature = self.signer.sign(&timestamp, "GET", path, query, "");
        let headers = self.auth_headers(&timestamp, &signature)?;

        let url = self.url_for(path, query)?;
        debug!(%url, "signed GET");
        let request = self.http_client.request(Method::GET, url).headers(headers);
        self.dispatch(request).await
    }

    /// Signed POST. The body is serialized exactly once; the same string is
    /// signed and transmitted, so key ordering cannot diverge.
    pub(crate) async fn post_signed<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.require_credentials(path)?;

        let body_string = serde_json::to_string(body)?;
        let timestamp = RequestSigner::timestamp_ms();
        let signature = self.signer.sign(&timestamp, "POST", path, "", &body_string);
        let headers = self.auth_headers(&timestamp, &signature)?;

        let url = self.url_for(path, "")?;
        debug!(%url, body_bytes = body_string.len(), "signed POST");
        let request = self
            .http_client
            .request(Method::POST, url)
            .headers(headers)
            .body(body_string);
        self.dispatch(request).await
    }

    /// Send a request and classify the outcome: transport failures surface
    /// as `Http`, non-2xx responses as `Api` with the raw body preserved.
    /// No retry happens here; pacing and retries belong to the caller.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeexError::api_error(status, body));
        }
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|err| {
            WeexError::InvalidResponse(format!("failed to decode response: {err}; body: {text}"))
        })
    }
}
