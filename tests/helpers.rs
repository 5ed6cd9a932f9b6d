//! Shared test helpers for connector integration tests
//!
//! This module provides constants and helper functions used by the client and
//! executor tests.

#![allow(dead_code)]

use kyc_connector::{ConnectorConfig, Credentials, FixedClock, SignedApiClient};
use std::sync::Arc;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Dummy application token
pub const DUMMY_APP_TOKEN: &str = "sbx:test-app-token";

/// Secret used by the signature fixture vector
pub const DUMMY_APP_SECRET: &str = "s3cr3t";

/// Fixed request timestamp (2023-11-14T22:13:20Z)
pub const DUMMY_TIMESTAMP: i64 = 1_700_000_000;

/// Dummy applicant ID (24 hex characters, provider format)
pub const DUMMY_APPLICANT_ID: &str = "5b594ade0a975a36c9349e66";

/// Dummy external user ID
pub const DUMMY_EXTERNAL_USER_ID: &str = "u1";

/// Dummy level name
pub const DUMMY_LEVEL_NAME: &str = "basic";

/// Signature of the create-applicant fixture request
/// (`1700000000POST/resources/applicants?levelName=basic{"externalUserId":"u1","levelName":"basic"}`)
pub const FIXTURE_CREATE_SIGNATURE: &str =
    "41467c10322ae149cda6c27a0059a775b8f67dbc4b90f8979c25d8fbd1ef6b94";

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Credentials pointing at a mock server.
pub fn test_credentials(base_url: &str) -> Credentials {
    Credentials::new(DUMMY_APP_TOKEN, DUMMY_APP_SECRET, base_url)
}

/// Client pointing at a mock server with the clock pinned to [`DUMMY_TIMESTAMP`].
pub fn create_test_client(base_url: &str) -> SignedApiClient {
    SignedApiClient::new(test_credentials(base_url))
        .expect("Failed to create test client")
        .with_clock(Arc::new(FixedClock(DUMMY_TIMESTAMP)))
}

/// Client with a custom timeout, clock pinned like [`create_test_client`].
pub fn create_test_client_with_timeout(base_url: &str, timeout_ms: u64) -> SignedApiClient {
    let mut config = ConnectorConfig::new(test_credentials(base_url));
    config.client.timeout_ms = timeout_ms;
    SignedApiClient::from_config(&config)
        .expect("Failed to create test client")
        .with_clock(Arc::new(FixedClock(DUMMY_TIMESTAMP)))
}

/// A minimal applicant record as returned by the provider.
pub fn applicant_response(id: &str, external_user_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "createdAt": "2023-11-14 22:13:21",
        "clientId": "acme",
        "inspectionId": "5b594ade0a975a36c9379e67",
        "externalUserId": external_user_id,
        "type": "individual",
        "review": {
            "reviewId": "JeAPq",
            "attemptId": "OSbfM",
            "attemptCnt": 0,
            "levelName": DUMMY_LEVEL_NAME,
            "createDate": "2023-11-14 22:13:21",
            "reviewStatus": "init",
            "priority": 0
        }
    })
}
