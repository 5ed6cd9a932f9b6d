//! Operation Dispatch Module
//!
//! Maps a (resource, operation) selector onto a closed set of operations and turns each
//! operation into a plain `(method, path, body)` triple. Everything here is pure: no
//! clocks, no credentials, no network.

pub mod applicant;
pub mod sdk_integrations;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConnectorError, Result};
use crate::params::ItemParameters;

pub use applicant::{validate_applicant_id, ApplicantFields, CreateApplicant, UpdateApplicant};
pub use sdk_integrations::{WebSdkLinkRequest, DEFAULT_LINK_TTL_SECS};

// ============================================================================
// HTTP PRIMITIVES
// ============================================================================

/// HTTP methods the provider API is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PATCH" => Ok(HttpMethod::Patch),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ConnectorError::InvalidParameter {
                name: "method".to_string(),
                reason: format!("unsupported HTTP method '{}'", s),
            }),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Unsigned description of one provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Request target, starts with '/', may carry a query string
    pub path: String,
    /// JSON body; `None` means no body at all (signed as the empty string)
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }
}

// ============================================================================
// ENCODING HELPERS
// ============================================================================

/// `encodeURIComponent` keeps `A-Z a-z 0-9 - _ . ! ~ * ' ( )`. The apostrophe is encoded
/// here as well because the URL parser escapes it in queries of http(s) URLs, and the
/// signed target has to equal the transmitted one.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for use in a path segment or query parameter.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Append `(key, value)` pairs to `body` in order, skipping absent or empty values.
///
/// Absent fields never show up as `null` or `""`: the provider treats a present key as
/// an explicit value.
pub fn append_present(body: &mut Map<String, Value>, fields: &[(&str, Option<&str>)]) {
    for (key, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            body.insert((*key).to_string(), Value::String(value.to_string()));
        }
    }
}

// ============================================================================
// DISPATCH TABLE
// ============================================================================

/// Resources the connector knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Applicant,
    SdkIntegrations,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Applicant => "applicant",
            Resource::SdkIntegrations => "sdkIntegrations",
        }
    }
}

impl FromStr for Resource {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "applicant" => Ok(Resource::Applicant),
            "sdkIntegrations" => Ok(Resource::SdkIntegrations),
            other => Err(ConnectorError::UnknownResource(other.to_string())),
        }
    }
}

/// Every supported (resource, operation) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    CreateApplicant,
    GetApplicant,
    GetApplicantStatus,
    UpdateApplicant,
    GenerateWebSdkLink,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::CreateApplicant,
        OperationKind::GetApplicant,
        OperationKind::GetApplicantStatus,
        OperationKind::UpdateApplicant,
        OperationKind::GenerateWebSdkLink,
    ];

    /// Resolve host selector strings.
    ///
    /// # Returns
    ///
    /// * `Ok(OperationKind)` - Selector is in the dispatch table
    /// * `Err(ConnectorError::UnknownResource)` - Resource is not known
    /// * `Err(ConnectorError::UnknownOperation)` - Resource is known, operation is not
    pub fn from_selector(resource: &str, operation: &str) -> Result<Self> {
        let resource_kind = Resource::from_str(resource)?;
        let kind = match (resource_kind, operation) {
            (Resource::Applicant, "create") => OperationKind::CreateApplicant,
            (Resource::Applicant, "get") => OperationKind::GetApplicant,
            (Resource::Applicant, "getStatus") => OperationKind::GetApplicantStatus,
            (Resource::Applicant, "update") => OperationKind::UpdateApplicant,
            (Resource::SdkIntegrations, "generateWebsdkLink") => OperationKind::GenerateWebSdkLink,
            _ => {
                return Err(ConnectorError::UnknownOperation {
                    resource: resource.to_string(),
                    operation: operation.to_string(),
                })
            }
        };
        Ok(kind)
    }

    pub fn resource(&self) -> Resource {
        match self {
            OperationKind::CreateApplicant
            | OperationKind::GetApplicant
            | OperationKind::GetApplicantStatus
            | OperationKind::UpdateApplicant => Resource::Applicant,
            OperationKind::GenerateWebSdkLink => Resource::SdkIntegrations,
        }
    }

    /// Operation selector as the host spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::CreateApplicant => "create",
            OperationKind::GetApplicant => "get",
            OperationKind::GetApplicantStatus => "getStatus",
            OperationKind::UpdateApplicant => "update",
            OperationKind::GenerateWebSdkLink => "generateWebsdkLink",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource().as_str(), self.as_str())
    }
}

/// A fully resolved operation, ready to be turned into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateApplicant(CreateApplicant),
    GetApplicant { applicant_id: String },
    GetApplicantStatus { applicant_id: String },
    UpdateApplicant(UpdateApplicant),
    GenerateWebSdkLink(WebSdkLinkRequest),
}

impl Operation {
    /// Resolve an item's parameters into an operation.
    ///
    /// Fails before any request is built when the selector is unknown or a required
    /// parameter is missing.
    pub fn from_params(params: &ItemParameters) -> Result<Self> {
        let kind = OperationKind::from_selector(&params.resource()?, &params.operation()?)?;
        Self::resolve(kind, params)
    }

    /// Resolve the parameters needed by an already selected operation.
    pub fn resolve(kind: OperationKind, params: &ItemParameters) -> Result<Self> {
        let operation = match kind {
            OperationKind::CreateApplicant => {
                Operation::CreateApplicant(CreateApplicant::from_params(params)?)
            }
            OperationKind::GetApplicant => Operation::GetApplicant {
                applicant_id: applicant::applicant_id_param(params)?,
            },
            OperationKind::GetApplicantStatus => Operation::GetApplicantStatus {
                applicant_id: applicant::applicant_id_param(params)?,
            },
            OperationKind::UpdateApplicant => {
                Operation::UpdateApplicant(UpdateApplicant::from_params(params)?)
            }
            OperationKind::GenerateWebSdkLink => {
                Operation::GenerateWebSdkLink(WebSdkLinkRequest::from_params(params)?)
            }
        };
        Ok(operation)
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::CreateApplicant(_) => OperationKind::CreateApplicant,
            Operation::GetApplicant { .. } => OperationKind::GetApplicant,
            Operation::GetApplicantStatus { .. } => OperationKind::GetApplicantStatus,
            Operation::UpdateApplicant(_) => OperationKind::UpdateApplicant,
            Operation::GenerateWebSdkLink(_) => OperationKind::GenerateWebSdkLink,
        }
    }

    /// Build the unsigned request for this operation.
    pub fn build(&self) -> ApiRequest {
        match self {
            Operation::CreateApplicant(create) => create.build(),
            Operation::GetApplicant { applicant_id } => applicant::get_request(applicant_id),
            Operation::GetApplicantStatus { applicant_id } => {
                applicant::status_request(applicant_id)
            }
            Operation::UpdateApplicant(update) => update.build(),
            Operation::GenerateWebSdkLink(link) => link.build(),
        }
    }
}
