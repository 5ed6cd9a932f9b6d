//! Batch Executor Module
//!
//! Runs one provider call per input item, in input order. With continue-on-fail enabled,
//! a failing item is replaced by `{"error": "<message>"}` and the batch goes on;
//! otherwise the first failure stops the batch.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::SignedApiClient;
use crate::error::{ConnectorError, Result};
use crate::operations::Operation;
use crate::params::ItemParameters;

/// Output for one input item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    /// Decoded provider response, or `{"error": ...}` under continue-on-fail
    pub json: Value,
    /// Index of the input item this result belongs to
    pub paired_item: usize,
}

impl ItemResult {
    pub fn is_error(&self) -> bool {
        self.json
            .as_object()
            .map(|o| o.len() == 1 && o.contains_key("error"))
            .unwrap_or(false)
    }
}

/// The first failure of a batch run without continue-on-fail.
#[derive(Debug, Error)]
#[error("Item {item_index} failed: {source}")]
pub struct BatchError {
    pub item_index: usize,
    #[source]
    pub source: ConnectorError,
}

/// Executes host items against a [`SignedApiClient`].
#[derive(Debug, Clone)]
pub struct Executor {
    client: SignedApiClient,
    continue_on_fail: bool,
}

impl Executor {
    pub fn new(client: SignedApiClient) -> Self {
        Self {
            client,
            continue_on_fail: false,
        }
    }

    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    pub fn client(&self) -> &SignedApiClient {
        &self.client
    }

    /// Run a single item.
    pub async fn run_item(&self, params: &ItemParameters) -> Result<Value> {
        let operation = Operation::from_params(params)?;
        debug!("Dispatching {}", operation.kind());
        self.client.dispatch(&operation).await
    }

    /// Run every item in order.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ItemResult>)` - One result per item, paired by index
    /// * `Err(BatchError)` - First failure, when continue-on-fail is off
    pub async fn execute(&self, items: &[ItemParameters]) -> std::result::Result<Vec<ItemResult>, BatchError> {
        info!("Executing {} item(s)", items.len());
        let mut results = Vec::with_capacity(items.len());

        for (index, params) in items.iter().enumerate() {
            match self.run_item(params).await {
                Ok(json) => results.push(ItemResult {
                    json,
                    paired_item: index,
                }),
                Err(e) if self.continue_on_fail => {
                    warn!("Item {} failed, continuing: {}", index, e);
                    results.push(ItemResult {
                        json: json!({ "error": e.to_string() }),
                        paired_item: index,
                    });
                }
                Err(e) => {
                    return Err(BatchError {
                        item_index: index,
                        source: e,
                    })
                }
            }
        }

        info!("Executed {} item(s)", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;

    fn executor() -> Executor {
        let client =
            SignedApiClient::new(Credentials::new("tok", "sec", "http://127.0.0.1:9")).unwrap();
        Executor::new(client)
    }

    #[test]
    fn test_pre_flight_error_aborts_without_continue() {
        let items = vec![ItemParameters::new().with("operation", "delete")];
        let err = tokio_test::block_on(executor().execute(&items)).unwrap_err();
        assert_eq!(err.item_index, 0);
        assert!(matches!(err.source, ConnectorError::UnknownOperation { .. }));
    }

    #[test]
    fn test_pre_flight_errors_become_payloads_with_continue() {
        let items = vec![
            ItemParameters::new().with("resource", "document").with("operation", "get"),
            ItemParameters::new().with("operation", "get"),
            ItemParameters::new().with("operation", "delete"),
        ];
        let results = tokio_test::block_on(executor().continue_on_fail(true).execute(&items)).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(ItemResult::is_error));
        assert_eq!(results[0].json["error"], "The resource \"document\" is not known!");
        assert_eq!(results[1].json["error"], "Missing required parameter: applicantId");
        assert_eq!(results[1].paired_item, 1);
        assert_eq!(results[2].json["error"], "The operation \"delete\" is not known!");
    }

    #[test]
    fn test_empty_batch() {
        let results = tokio_test::block_on(executor().execute(&[])).unwrap();
        assert!(results.is_empty());
    }
}
