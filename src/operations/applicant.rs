//! Applicant request builders

use serde_json::{Map, Value};
use tracing::debug;

use super::{append_present, encode_component, ApiRequest, HttpMethod};
use crate::error::{ConnectorError, Result};
use crate::params::ItemParameters;

/// Host collection holding the optional fields of a create request.
pub const ADDITIONAL_FIELDS: &str = "additionalFields";
/// Host collection holding the fields of an update request.
pub const UPDATE_FIELDS: &str = "updateFields";

/// Optional applicant contact and name fields.
///
/// Only values that are present and non-empty end up in a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantFields {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ApplicantFields {
    fn from_collection(params: &ItemParameters, collection: &str) -> Result<Self> {
        Ok(Self {
            email: params.optional_str(collection, "email")?,
            phone: params.optional_str(collection, "phone")?,
            first_name: params.optional_str(collection, "firstName")?,
            last_name: params.optional_str(collection, "lastName")?,
        })
    }

    fn append_to(&self, body: &mut Map<String, Value>) {
        append_present(
            body,
            &[
                ("email", self.email.as_deref()),
                ("phone", self.phone.as_deref()),
                ("firstName", self.first_name.as_deref()),
                ("lastName", self.last_name.as_deref()),
            ],
        );
    }
}

// ============================================================================
// CREATE
// ============================================================================

/// Create an applicant for an external user at a verification level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateApplicant {
    pub external_user_id: String,
    pub level_name: String,
    pub fields: ApplicantFields,
}

impl CreateApplicant {
    pub fn new(external_user_id: impl Into<String>, level_name: impl Into<String>) -> Self {
        Self {
            external_user_id: external_user_id.into(),
            level_name: level_name.into(),
            fields: ApplicantFields::default(),
        }
    }

    pub fn with_fields(mut self, fields: ApplicantFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn from_params(params: &ItemParameters) -> Result<Self> {
        // sourceKey is offered by the host form but has never been part of the request
        if params.has_value(ADDITIONAL_FIELDS, "sourceKey") {
            debug!("Ignoring sourceKey for applicant creation; it is not sent to the provider");
        }

        Ok(Self {
            external_user_id: params.required_str("externalUserId")?,
            level_name: params.required_str("levelName")?,
            fields: ApplicantFields::from_collection(params, ADDITIONAL_FIELDS)?,
        })
    }

    /// `POST /resources/applicants?levelName=<level>`
    pub fn build(&self) -> ApiRequest {
        let mut body = Map::new();
        body.insert(
            "externalUserId".to_string(),
            Value::String(self.external_user_id.clone()),
        );
        body.insert("levelName".to_string(), Value::String(self.level_name.clone()));
        self.fields.append_to(&mut body);

        ApiRequest::new(
            HttpMethod::Post,
            format!(
                "/resources/applicants?levelName={}",
                encode_component(&self.level_name)
            ),
            Some(Value::Object(body)),
        )
    }
}

// ============================================================================
// READ
// ============================================================================

/// Reject IDs that the URL parser would treat as a dot segment.
///
/// `.` and `..` are collapsed on the wire even when percent-encoded, so the request
/// would reach a different endpoint than the one that was signed.
pub fn validate_applicant_id(applicant_id: &str) -> Result<()> {
    if applicant_id == "." || applicant_id == ".." {
        return Err(ConnectorError::InvalidParameter {
            name: "applicantId".to_string(),
            reason: "must not be a dot segment".to_string(),
        });
    }
    Ok(())
}

/// Required `applicantId` from host parameters, validated as a path segment.
pub fn applicant_id_param(params: &ItemParameters) -> Result<String> {
    let applicant_id = params.required_str("applicantId")?;
    validate_applicant_id(&applicant_id)?;
    Ok(applicant_id)
}

/// `GET /resources/applicants/<id>/one`
pub fn get_request(applicant_id: &str) -> ApiRequest {
    ApiRequest::new(
        HttpMethod::Get,
        format!("/resources/applicants/{}/one", encode_component(applicant_id)),
        None,
    )
}

/// `GET /resources/applicants/<id>/status`
pub fn status_request(applicant_id: &str) -> ApiRequest {
    ApiRequest::new(
        HttpMethod::Get,
        format!("/resources/applicants/{}/status", encode_component(applicant_id)),
        None,
    )
}

// ============================================================================
// UPDATE
// ============================================================================

/// Change an applicant's contact or name fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateApplicant {
    pub applicant_id: String,
    pub fields: ApplicantFields,
}

impl UpdateApplicant {
    pub fn new(applicant_id: impl Into<String>, fields: ApplicantFields) -> Self {
        Self {
            applicant_id: applicant_id.into(),
            fields,
        }
    }

    pub fn from_params(params: &ItemParameters) -> Result<Self> {
        Ok(Self {
            applicant_id: applicant_id_param(params)?,
            fields: ApplicantFields::from_collection(params, UPDATE_FIELDS)?,
        })
    }

    /// `PATCH /resources/applicants/<id>/info`; an empty `{}` body is still sent.
    pub fn build(&self) -> ApiRequest {
        let mut body = Map::new();
        self.fields.append_to(&mut body);

        ApiRequest::new(
            HttpMethod::Patch,
            format!(
                "/resources/applicants/{}/info",
                encode_component(&self.applicant_id)
            ),
            Some(Value::Object(body)),
        )
    }
}
