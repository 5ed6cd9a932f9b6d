//! KYC Connector Library
//!
//! Signed REST client for a KYC provider's applicant and verification-link API, plus
//! a batch executor that a workflow host (or the bundled CLI) drives with one
//! parameter mapping per input item.

pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod executor;
pub mod operations;
pub mod params;
pub mod types;

// Re-export commonly used types
pub use client::{Clock, FixedClock, SignedApiClient, SystemClock};
pub use config::{ClientConfig, ConnectorConfig, Credentials};
pub use crypto::{sign, SignedRequest};
pub use error::{ConnectorError, Result};
pub use executor::{BatchError, Executor, ItemResult};
pub use operations::{
    ApiRequest, ApplicantFields, CreateApplicant, HttpMethod, Operation, OperationKind, Resource,
    UpdateApplicant, WebSdkLinkRequest,
};
pub use params::ItemParameters;
pub use types::{Applicant, ApplicantReview, ReviewAnswer, ReviewStatus, WebSdkLink};
