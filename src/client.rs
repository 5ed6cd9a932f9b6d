//! Signed API Client Module
//!
//! HTTP client for the KYC provider REST API. Every call serializes its body once,
//! signs those exact bytes together with a fresh timestamp, and sends the same bytes.
//!
//! ## Features
//!
//! - Uniform signing and sending for every operation builder
//! - Typed helpers for the documented response shapes
//! - Injectable clock so signatures can be reproduced in tests

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::config::{ConnectorConfig, Credentials};
use crate::crypto::SignedRequest;
use crate::error::{ConnectorError, Result};
use crate::operations::{
    applicant, ApiRequest, CreateApplicant, HttpMethod, Operation, UpdateApplicant,
    WebSdkLinkRequest,
};
use crate::types::{Applicant, ApplicantReview, WebSdkLink};

pub const APP_TOKEN_HEADER: &str = "X-App-Token";
pub const SIGNATURE_HEADER: &str = "X-App-Access-Sig";
pub const TIMESTAMP_HEADER: &str = "X-App-Access-Ts";

// ============================================================================
// CLOCK
// ============================================================================

/// Source of request timestamps, read once per request right before signing.
pub trait Clock: Send + Sync {
    /// Current Unix time in whole seconds.
    fn now_secs(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.0
    }
}

// ============================================================================
// SIGNED API CLIENT
// ============================================================================

/// HTTP client for the provider API.
///
/// Cheap to clone; clones share the connection pool. Holds no per-call state.
#[derive(Clone)]
pub struct SignedApiClient {
    credentials: Credentials,
    client: Client,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SignedApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedApiClient")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl SignedApiClient {
    /// Create a client with default client settings.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Provider credentials; validated before anything else happens
    ///
    /// # Returns
    ///
    /// * `Ok(SignedApiClient)` - New client instance
    /// * `Err(ConnectorError::Configuration)` - Credentials are invalid
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::from_config(&ConnectorConfig::new(credentials))
    }

    /// Create a client from a full configuration.
    pub fn from_config(config: &ConnectorConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().timeout(config.client.timeout());
        if let Some(agent) = &config.client.user_agent {
            let mut headers = reqwest::header::HeaderMap::new();
            let value = reqwest::header::HeaderValue::from_str(agent).map_err(|e| {
                ConnectorError::Configuration(format!("Invalid user_agent '{}': {}", agent, e))
            })?;
            headers.insert(USER_AGENT, value);
            builder = builder.default_headers(headers);
        }
        let client = builder.build().map_err(|e| {
            ConnectorError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            credentials: config.credentials.clone(),
            client,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Serialize, timestamp and sign a request without sending it.
    ///
    /// The returned `body` string is the one that must be transmitted.
    pub fn prepare(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<SignedRequest> {
        let body = match body {
            Some(value) => serde_json::to_string(value)?,
            None => String::new(),
        };
        let timestamp = self.clock.now_secs();
        Ok(SignedRequest::new(
            &self.credentials.app_secret,
            timestamp,
            method,
            path,
            body,
        ))
    }

    /// Sign and send one request.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - Request target starting with '/', query string included
    /// * `body` - JSON body, or `None` for no body
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - Decoded response body (`Value::Null` for an empty 2xx body)
    /// * `Err(ConnectorError::Http)` - Non-2xx status, with the raw response body
    /// * `Err(ConnectorError::Transport)` - Network failure or timeout
    pub async fn send(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<Value> {
        let signed = self.prepare(method, path, body)?;
        self.send_signed(signed).await
    }

    /// Send a request prepared by [`Self::prepare`].
    pub async fn send_signed(&self, signed: SignedRequest) -> Result<Value> {
        let url = format!("{}{}", self.credentials.base_url(), signed.path);
        debug!("{} {}", signed.method, signed.path);

        let mut request = self
            .client
            .request(signed.method.into(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(APP_TOKEN_HEADER, &self.credentials.app_token)
            .header(SIGNATURE_HEADER, &signed.signature)
            .header(TIMESTAMP_HEADER, signed.timestamp.to_string());
        if signed.has_body() {
            request = request.body(signed.body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("{} {} -> {}", signed.method, signed.path, status.as_u16());
        trace!("Response body: {}", text);

        if !status.is_success() {
            return Err(ConnectorError::Http {
                status: status.as_u16(),
                body: text,
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            ConnectorError::InvalidResponse(format!("{} (status {})", e, status.as_u16()))
        })
    }

    /// Send an unsigned request description.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value> {
        self.send(request.method, &request.path, request.body.as_ref())
            .await
    }

    /// Build and send the request for a resolved operation.
    pub async fn dispatch(&self, operation: &Operation) -> Result<Value> {
        self.execute(&operation.build()).await
    }

    // ------------------------------------------------------------------------
    // Typed helpers
    // ------------------------------------------------------------------------

    pub async fn create_applicant(&self, request: &CreateApplicant) -> Result<Applicant> {
        decode(self.execute(&request.build()).await?)
    }

    pub async fn get_applicant(&self, applicant_id: &str) -> Result<Applicant> {
        applicant::validate_applicant_id(applicant_id)?;
        decode(self.execute(&applicant::get_request(applicant_id)).await?)
    }

    pub async fn get_applicant_status(&self, applicant_id: &str) -> Result<ApplicantReview> {
        applicant::validate_applicant_id(applicant_id)?;
        decode(self.execute(&applicant::status_request(applicant_id)).await?)
    }

    pub async fn update_applicant(&self, request: &UpdateApplicant) -> Result<Applicant> {
        applicant::validate_applicant_id(&request.applicant_id)?;
        decode(self.execute(&request.build()).await?)
    }

    pub async fn generate_websdk_link(&self, request: &WebSdkLinkRequest) -> Result<WebSdkLink> {
        decode(self.execute(&request.build()).await?)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ConnectorError::InvalidResponse(format!("Unexpected response shape: {}", e)))
}
