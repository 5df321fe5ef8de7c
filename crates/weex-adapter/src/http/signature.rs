/*
[INPUT]:  Request fields (timestamp, method, path, query, body) and secret key
[OUTPUT]: Base64-encoded HMAC-SHA256 signature for ACCESS-SIGN header
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or message layout
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Signs HTTP requests for authenticated endpoints.
///
/// The signed message is the exact concatenation
/// `timestamp + METHOD + path + query + body`, where `query` keeps its
/// leading `?` (or is empty) and `body` is the serialized JSON string that
/// is also transmitted on the wire. GET requests sign with an empty body.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    secret_key: String,
}

impl RequestSigner {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
        }
    }

    /// Millisecond timestamp as the exchange expects it in ACCESS-TIMESTAMP.
    ///
    /// Captured once per call by the client and reused for both the signed
    /// message and the header.
    pub fn timestamp_ms() -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_millis()
            .to_string()
    }

    /// Sign a request. Pure function of the five fields plus the secret.
    pub fn sign(
        &self,
        timestamp: &str,
        method: &str,
        path: &str,
        query: &str,
        body: &str,
    ) -> String {
        let message = format!("{timestamp}{}{path}{query}{body}", method.to_uppercase());
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }
}
