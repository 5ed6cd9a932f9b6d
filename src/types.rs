//! Provider Response Types
//!
//! Typed views over the documented response shapes. The provider's record is
//! authoritative, so every field except the identifiers is optional and unknown fields
//! are kept in `extra` rather than rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// APPLICANT
// ============================================================================

/// Applicant record as returned by create, get and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    /// Provider-assigned applicant ID
    pub id: String,
    /// Creation time (`yyyy-MM-dd HH:mm:ss`, UTC)
    #[serde(default)]
    pub created_at: Option<String>,
    /// Provider account the applicant belongs to
    #[serde(default)]
    pub client_id: Option<String>,
    /// ID of the inspection holding the uploaded documents
    #[serde(default)]
    pub inspection_id: Option<String>,
    /// Caller's own user ID, unique per applicant
    #[serde(default)]
    pub external_user_id: Option<String>,
    /// Source key, when the account segments applicants by source
    #[serde(default)]
    pub source_key: Option<String>,
    /// Personal data as submitted
    #[serde(default)]
    pub info: Option<ApplicantInfo>,
    /// Personal data fixed by the operator, overriding extracted values
    #[serde(default)]
    pub fixed_info: Option<ApplicantInfo>,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Platform the applicant last used (e.g., "Web")
    #[serde(default)]
    pub applicant_platform: Option<String>,
    /// Country resolved from the applicant's IP (ISO 3166-1 alpha-3)
    #[serde(default)]
    pub ip_country: Option<String>,
    /// Provider authentication code
    #[serde(default)]
    pub auth_code: Option<String>,
    /// Preferred UI language
    #[serde(default)]
    pub lang: Option<String>,
    /// Custom key/value pairs
    #[serde(default)]
    pub metadata: Option<Vec<MetadataEntry>>,
    /// Individual or company
    #[serde(rename = "type", default)]
    pub applicant_type: Option<ApplicantType>,
    /// Operator tags
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Current review state
    #[serde(default)]
    pub review: Option<ApplicantReview>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicantType {
    Individual,
    Company,
}

/// Key/value pair attached to an applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

/// Personal data of an applicant, as submitted or as extracted from documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tin: Option<String>,
}

// ============================================================================
// REVIEW STATUS
// ============================================================================

/// Position of an applicant in the provider's verification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewStatus {
    Init,
    Pending,
    Prechecked,
    Queued,
    Completed,
    OnHold,
}

impl ReviewStatus {
    /// True once the provider has reached a final answer.
    pub fn is_completed(&self) -> bool {
        matches!(self, ReviewStatus::Completed)
    }
}

/// Terminal verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewAnswer {
    Green,
    Red,
}

/// Whether a rejected applicant may resubmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewRejectType {
    Final,
    Retry,
}

/// Answer and rejection details of a completed review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    /// GREEN (approved) or RED (rejected)
    pub review_answer: ReviewAnswer,
    /// Machine-readable rejection reasons
    #[serde(default)]
    pub reject_labels: Option<Vec<String>>,
    /// Whether the applicant may resubmit
    #[serde(default)]
    pub review_reject_type: Option<ReviewRejectType>,
    /// Comment intended for the account owner
    #[serde(default)]
    pub client_comment: Option<String>,
    /// Comment intended for the applicant
    #[serde(default)]
    pub moderation_comment: Option<String>,
    /// Rejection reasons as selected by the moderator
    #[serde(default)]
    pub button_ids: Option<Vec<String>>,
}

/// Review state returned by the status endpoint and embedded in [`Applicant`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantReview {
    /// Pipeline position
    pub review_status: ReviewStatus,
    /// ID of the current review
    #[serde(default)]
    pub review_id: Option<String>,
    /// Verification level the applicant is checked against
    #[serde(default)]
    pub level_name: Option<String>,
    /// ID of the current verification attempt
    #[serde(default)]
    pub attempt_id: Option<String>,
    /// Number of attempts so far
    #[serde(default)]
    pub attempt_cnt: Option<u32>,
    /// Time spent waiting since the review became pending
    #[serde(default)]
    pub elapsed_since_pending_ms: Option<u64>,
    /// Review creation time
    #[serde(default)]
    pub create_date: Option<String>,
    /// Time the review reached its answer
    #[serde(default)]
    pub review_date: Option<String>,
    /// Outcome, once the review is completed
    #[serde(default)]
    pub review_result: Option<ReviewResult>,
    /// Queue priority
    #[serde(default)]
    pub priority: Option<i64>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApplicantReview {
    /// Final answer, if the review has produced one.
    pub fn answer(&self) -> Option<ReviewAnswer> {
        self.review_result.as_ref().map(|r| r.review_answer)
    }
}

// ============================================================================
// SDK INTEGRATIONS
// ============================================================================

/// Hosted verification link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSdkLink {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_applicant_parses_documented_shape_and_keeps_extras() {
        let applicant: Applicant = serde_json::from_value(json!({
            "id": "5b594ade0a975a36c9349e66",
            "createdAt": "2020-06-24 05:05:14",
            "clientId": "ClientName",
            "inspectionId": "5b594ade0a975a36c9379e67",
            "externalUserId": "u1",
            "info": { "firstName": "Jane", "country": "DEU" },
            "type": "individual",
            "requiredIdDocs": { "docSets": [] },
            "review": {
                "reviewStatus": "completed",
                "reviewResult": { "reviewAnswer": "GREEN" }
            }
        }))
        .unwrap();

        assert_eq!(applicant.applicant_type, Some(ApplicantType::Individual));
        assert_eq!(applicant.info.unwrap().first_name.as_deref(), Some("Jane"));
        assert!(applicant.extra.contains_key("requiredIdDocs"));
        let review = applicant.review.unwrap();
        assert!(review.review_status.is_completed());
        assert_eq!(review.answer(), Some(ReviewAnswer::Green));
    }

    #[test]
    fn test_review_status_values() {
        for (raw, status) in [
            ("init", ReviewStatus::Init),
            ("pending", ReviewStatus::Pending),
            ("prechecked", ReviewStatus::Prechecked),
            ("queued", ReviewStatus::Queued),
            ("completed", ReviewStatus::Completed),
            ("onHold", ReviewStatus::OnHold),
        ] {
            assert_eq!(serde_json::from_value::<ReviewStatus>(json!(raw)).unwrap(), status);
        }
    }

    #[test]
    fn test_rejected_review() {
        let review: ApplicantReview = serde_json::from_value(json!({
            "reviewId": "abc",
            "attemptCnt": 2,
            "reviewStatus": "completed",
            "reviewResult": {
                "reviewAnswer": "RED",
                "rejectLabels": ["FORGERY"],
                "reviewRejectType": "FINAL"
            }
        }))
        .unwrap();
        let result = review.review_result.unwrap();
        assert_eq!(result.review_answer, ReviewAnswer::Red);
        assert_eq!(result.review_reject_type, Some(ReviewRejectType::Final));
        assert_eq!(review.attempt_cnt, Some(2));
    }
}
