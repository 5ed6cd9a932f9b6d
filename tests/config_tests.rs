//! Integration tests for configuration loading (config module)
//!
//! Tests that read or write environment variables hold `ENV_LOCK`, since the test
//! harness runs them on parallel threads of one process.

use kyc_connector::config::{
    ConnectorConfig, API_URL_ENV, APP_SECRET_ENV, APP_TOKEN_ENV, CONFIG_PATH_ENV, DEFAULT_API_URL,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

static ENV_LOCK: Mutex<()> = Mutex::new(());

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Write `content` to `.tmp/<name>/connector.toml` and return its path.
fn write_config(name: &str, content: &str) -> PathBuf {
    let dir = PathBuf::from(".tmp").join(name);
    fs::create_dir_all(&dir).unwrap();
    let file = dir.join("connector.toml");
    fs::write(&file, content).unwrap();
    file
}

fn cleanup(file: &PathBuf) {
    fs::remove_file(file).unwrap();
    if let Some(dir) = file.parent() {
        let _ = fs::remove_dir(dir);
    }
}

fn clear_credential_env() {
    std::env::remove_var(APP_TOKEN_ENV);
    std::env::remove_var(APP_SECRET_ENV);
    std::env::remove_var(API_URL_ENV);
}

const FULL_CONFIG: &str = r#"
[credentials]
app_token = "file-token"
app_secret = "file-secret"
api_url = "https://test-api.example.com/"

[client]
timeout_ms = 5000
user_agent = "kyc-connector-tests"
"#;

// ============================================================================
// LOADING TESTS
// ============================================================================

/// What is tested: ConnectorConfig::load() honours the config path environment variable
/// Why: Deployments point the binary at their config without CLI flags
#[test]
fn test_config_load_from_env_path() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_credential_env();
    let file = write_config("config_env_path", FULL_CONFIG);

    std::env::set_var(CONFIG_PATH_ENV, &file);
    let config = ConnectorConfig::load().unwrap();

    assert_eq!(config.credentials.app_token, "file-token");
    assert_eq!(config.credentials.app_secret, "file-secret");
    assert_eq!(config.credentials.base_url(), "https://test-api.example.com");
    assert_eq!(config.client.timeout(), Duration::from_millis(5000));
    assert_eq!(config.client.user_agent.as_deref(), Some("kyc-connector-tests"));

    std::env::remove_var(CONFIG_PATH_ENV);
    cleanup(&file);
}

/// What is tested: ConnectorConfig::load() returns error when file doesn't exist
/// Why: The message must tell the operator to copy the template
#[test]
fn test_config_load_file_not_found() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(CONFIG_PATH_ENV, ".tmp/nonexistent/connector.toml");

    let result = ConnectorConfig::load();
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("not found"));
    assert!(message.contains("connector.template.toml"));

    std::env::remove_var(CONFIG_PATH_ENV);
}

/// What is tested: omitted api_url and client section fall back to defaults
/// Why: A minimal file only needs the two credentials
#[test]
fn test_config_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_credential_env();
    let file = write_config(
        "config_defaults",
        "[credentials]\napp_token = \"t\"\napp_secret = \"s\"\n",
    );

    let config = ConnectorConfig::load_from_path(file.to_str()).unwrap();
    assert_eq!(config.credentials.api_url, DEFAULT_API_URL);
    assert_eq!(config.client.timeout(), Duration::from_secs(30));
    assert!(config.client.user_agent.is_none());

    cleanup(&file);
}

/// What is tested: credential environment variables override file values
/// Why: Secrets are usually injected by the environment, not committed to files
#[test]
fn test_config_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let file = write_config("config_env_overrides", FULL_CONFIG);

    std::env::set_var(APP_TOKEN_ENV, "env-token");
    std::env::set_var(APP_SECRET_ENV, "env-secret");
    // Empty values leave the file value in place
    std::env::set_var(API_URL_ENV, "");

    let config = ConnectorConfig::load_from_path(file.to_str()).unwrap();
    assert_eq!(config.credentials.app_token, "env-token");
    assert_eq!(config.credentials.app_secret, "env-secret");
    assert_eq!(config.credentials.api_url, "https://test-api.example.com/");

    clear_credential_env();
    cleanup(&file);
}

// ============================================================================
// VALIDATION TESTS
// ============================================================================

/// What is tested: load rejects a file with an empty secret
/// Why: Signing with an empty secret would only fail later at the provider
#[test]
fn test_config_rejects_empty_secret() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_credential_env();
    let file = write_config(
        "config_empty_secret",
        "[credentials]\napp_token = \"t\"\napp_secret = \"\"\n",
    );

    let result = ConnectorConfig::load_from_path(file.to_str());
    assert!(result.is_err());

    cleanup(&file);
}

/// What is tested: load rejects a zero timeout and a malformed TOML document
/// Why: Both would otherwise surface as confusing transport errors
#[test]
fn test_config_rejects_bad_client_settings() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_credential_env();
    let zero_timeout = write_config(
        "config_zero_timeout",
        "[credentials]\napp_token = \"t\"\napp_secret = \"s\"\n[client]\ntimeout_ms = 0\n",
    );
    let malformed = write_config("config_malformed", "[credentials\napp_token = ");

    let err = ConnectorConfig::load_from_path(zero_timeout.to_str()).unwrap_err();
    assert!(err.to_string().contains("timeout_ms"));
    let err = ConnectorConfig::load_from_path(malformed.to_str()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));

    cleanup(&zero_timeout);
    cleanup(&malformed);
}
