//! Item Parameters Module
//!
//! The host resolves its node parameters for every input item and hands them over as a
//! JSON object. This module gives typed, validated access to that mapping; it knows
//! nothing about which operation will consume the values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConnectorError, Result};

/// Resource used when an item does not name one.
pub const DEFAULT_RESOURCE: &str = "applicant";

/// Resolved parameters for one input item.
///
/// Optional values may be supplied either inside a named collection
/// (`additionalFields`, `updateFields`) or flattened at the top level; the collection wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemParameters(Map<String, Value>);

impl ItemParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a host-supplied JSON value. Anything other than an object is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ConnectorError::InvalidParameter {
                name: "item".to_string(),
                reason: format!("expected a JSON object, got {}", json_type(&other)),
            }),
        }
    }

    /// Builder-style setter, mostly for hosts that assemble parameters in code.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Resource selector, defaulting to [`DEFAULT_RESOURCE`].
    pub fn resource(&self) -> Result<String> {
        Ok(string_value("resource", self.0.get("resource"))?
            .unwrap_or_else(|| DEFAULT_RESOURCE.to_string()))
    }

    /// Operation selector. There is no default; hosts must always choose one.
    pub fn operation(&self) -> Result<String> {
        self.required_str("operation")
    }

    /// A top-level string parameter that must be present and non-empty.
    pub fn required_str(&self, name: &str) -> Result<String> {
        string_value(name, self.0.get(name))?
            .ok_or_else(|| ConnectorError::MissingParameter(name.to_string()))
    }

    /// An optional string looked up in `collection` first, then at the top level.
    ///
    /// Empty strings count as "not provided".
    pub fn optional_str(&self, collection: &str, name: &str) -> Result<Option<String>> {
        string_value(name, self.lookup(collection, name)?)
    }

    /// An optional non-negative integer looked up like [`Self::optional_str`].
    ///
    /// Numeric strings are accepted since many hosts stringify form inputs.
    pub fn optional_u64(&self, collection: &str, name: &str) -> Result<Option<u64>> {
        match self.lookup(collection, name)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| invalid(name, "expected a non-negative integer")),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|_| invalid(name, "expected a non-negative integer")),
            Some(other) => Err(invalid(
                name,
                &format!("expected a number, got {}", json_type(other)),
            )),
        }
    }

    /// True when `name` carries a non-empty value in `collection` or at the top level.
    pub fn has_value(&self, collection: &str, name: &str) -> bool {
        matches!(self.optional_str(collection, name), Ok(Some(_)))
    }

    fn lookup(&self, collection: &str, name: &str) -> Result<Option<&Value>> {
        match self.0.get(collection) {
            None | Some(Value::Null) => {}
            Some(Value::Object(fields)) => {
                if let Some(value) = fields.get(name) {
                    return Ok(Some(value));
                }
            }
            Some(other) => {
                return Err(invalid(
                    collection,
                    &format!("expected an object, got {}", json_type(other)),
                ))
            }
        }
        Ok(self.0.get(name))
    }
}

impl From<Map<String, Value>> for ItemParameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn string_value(name: &str, value: Option<&Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        // Phone numbers and ids sometimes arrive as numbers from upstream nodes
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(invalid(
            name,
            &format!("expected a string, got {}", json_type(other)),
        )),
    }
}

fn invalid(name: &str, reason: &str) -> ConnectorError {
    ConnectorError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = ItemParameters::from_value(json!(["applicant"])).unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidParameter { ref name, .. } if name == "item"));
    }

    #[test]
    fn test_resource_defaults_to_applicant() {
        let params = ItemParameters::new().with("operation", "get");
        assert_eq!(params.resource().unwrap(), "applicant");
        assert_eq!(params.operation().unwrap(), "get");
    }

    #[test]
    fn test_required_str_treats_empty_as_missing() {
        let params = ItemParameters::new().with("applicantId", "");
        let err = params.required_str("applicantId").unwrap_err();
        assert!(matches!(err, ConnectorError::MissingParameter(ref n) if n == "applicantId"));
    }

    #[test]
    fn test_optional_str_prefers_collection_then_top_level() {
        let params = ItemParameters::from_value(json!({
            "email": "top@example.com",
            "phone": "+100",
            "additionalFields": { "email": "nested@example.com", "firstName": "" }
        }))
        .unwrap();

        assert_eq!(
            params.optional_str("additionalFields", "email").unwrap().as_deref(),
            Some("nested@example.com")
        );
        assert_eq!(
            params.optional_str("additionalFields", "phone").unwrap().as_deref(),
            Some("+100")
        );
        assert_eq!(params.optional_str("additionalFields", "firstName").unwrap(), None);
        assert_eq!(params.optional_str("additionalFields", "lastName").unwrap(), None);
        assert!(!params.has_value("additionalFields", "firstName"));
    }

    #[test]
    fn test_optional_str_accepts_numbers() {
        let params = ItemParameters::new().with("phone", 4915112345678u64);
        assert_eq!(
            params.optional_str("additionalFields", "phone").unwrap().as_deref(),
            Some("4915112345678")
        );
    }

    #[test]
    fn test_collection_must_be_an_object() {
        let params = ItemParameters::new().with("updateFields", "email=x");
        assert!(params.optional_str("updateFields", "email").is_err());
    }

    #[test]
    fn test_optional_u64_parsing() {
        let params = ItemParameters::from_value(json!({
            "additionalFields": { "ttlInSecs": "3600" },
            "bad": -5
        }))
        .unwrap();
        assert_eq!(params.optional_u64("additionalFields", "ttlInSecs").unwrap(), Some(3600));
        assert_eq!(params.optional_u64("additionalFields", "missing").unwrap(), None);
        assert!(params.optional_u64("additionalFields", "bad").is_err());
    }
}
