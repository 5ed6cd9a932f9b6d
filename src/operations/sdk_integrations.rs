//! WebSDK link builder
//!
//! Generates a hosted verification link the applicant can open in a browser. The
//! provider creates the applicant on first visit if `userId` is not known yet.

use serde_json::{Map, Value};

use super::{append_present, ApiRequest, HttpMethod};
use crate::error::{ConnectorError, Result};
use crate::params::ItemParameters;

/// Link lifetime used when the host does not supply one.
pub const DEFAULT_LINK_TTL_SECS: u64 = 1800;

const WEBSDK_LINK_PATH: &str = "/resources/sdkIntegrations/levels/-/websdkLink";
const ADDITIONAL_FIELDS: &str = "additionalFields";

/// Request for a hosted verification link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSdkLinkRequest {
    pub level_name: String,
    pub user_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub ttl_in_secs: u64,
    pub external_action_id: Option<String>,
}

impl WebSdkLinkRequest {
    pub fn new(level_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            level_name: level_name.into(),
            user_id: user_id.into(),
            email: None,
            phone: None,
            ttl_in_secs: DEFAULT_LINK_TTL_SECS,
            external_action_id: None,
        }
    }

    pub fn from_params(params: &ItemParameters) -> Result<Self> {
        let ttl_in_secs = params
            .optional_u64(ADDITIONAL_FIELDS, "ttlInSecs")?
            .unwrap_or(DEFAULT_LINK_TTL_SECS);
        if ttl_in_secs == 0 {
            return Err(ConnectorError::InvalidParameter {
                name: "ttlInSecs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            level_name: params.required_str("levelName")?,
            user_id: params.required_str("userId")?,
            email: params.optional_str(ADDITIONAL_FIELDS, "email")?,
            phone: params.optional_str(ADDITIONAL_FIELDS, "phone")?,
            ttl_in_secs,
            external_action_id: params.optional_str(ADDITIONAL_FIELDS, "externalActionId")?,
        })
    }

    /// `POST /resources/sdkIntegrations/levels/-/websdkLink`
    pub fn build(&self) -> ApiRequest {
        let mut body = Map::new();
        body.insert("levelName".to_string(), Value::String(self.level_name.clone()));
        body.insert("userId".to_string(), Value::String(self.user_id.clone()));

        let mut identifiers = Map::new();
        append_present(
            &mut identifiers,
            &[
                ("email", self.email.as_deref()),
                ("phone", self.phone.as_deref()),
            ],
        );
        if !identifiers.is_empty() {
            body.insert("applicantIdentifiers".to_string(), Value::Object(identifiers));
        }

        body.insert("ttlInSecs".to_string(), Value::from(self.ttl_in_secs));
        append_present(
            &mut body,
            &[("externalActionId", self.external_action_id.as_deref())],
        );

        ApiRequest::new(HttpMethod::Post, WEBSDK_LINK_PATH, Some(Value::Object(body)))
    }
}
