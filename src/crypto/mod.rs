//! Request Signing Module
//!
//! Computes the `X-App-Access-Sig` header value. The provider recomputes the same
//! HMAC from the received timestamp header, method, request target and raw body, and
//! rejects the request when the digests differ, so every input here must be the exact
//! bytes that go on the wire.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::operations::HttpMethod;

type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// SIGNATURE COMPUTATION
// ============================================================================

/// Sign a request.
///
/// The signed message is `timestamp + METHOD + path + body` with no separators.
///
/// # Arguments
///
/// * `secret` - Application secret used as the HMAC key
/// * `timestamp` - Unix time in whole seconds, as sent in `X-App-Access-Ts`
/// * `method` - HTTP method; upper-cased before signing
/// * `path` - Request target including the query string, without scheme or host
/// * `body` - Serialized request body, or `""` when the request has none
///
/// # Returns
///
/// * `String` - Lower-case hex HMAC-SHA256 digest
pub fn sign(secret: &str, timestamp: i64, method: &str, path: &str, body: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take a key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(method.to_ascii_uppercase().as_bytes());
    mac.update(path.as_bytes());
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

// ============================================================================
// SIGNED REQUEST
// ============================================================================

/// A request whose signature has been computed over its final wire form.
///
/// Built immediately before sending and never reused; the timestamp reflects send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: HttpMethod,
    /// Request target, starts with '/', includes the query string
    pub path: String,
    /// Exact body bytes transmitted; empty when there is no body
    pub body: String,
    pub timestamp: i64,
    pub signature: String,
}

impl SignedRequest {
    /// Sign `body` as given; it must already be the final serialized form.
    pub fn new(
        secret: &str,
        timestamp: i64,
        method: HttpMethod,
        path: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let body = body.into();
        let signature = sign(secret, timestamp, method.as_str(), &path, &body);
        Self {
            method,
            path,
            body,
            timestamp,
            signature,
        }
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}
