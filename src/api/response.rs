use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Assessment, Evaluation};

/// Response from a claim assessment.
///
/// The assessment's own keys are flattened in, so a client that only knows
/// the four-key assessment shape can read it unchanged.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    /// Unique id for this assessment, for correlating logs
    pub assessment_id: Uuid,

    pub assessed_at: DateTime<Utc>,

    /// Policy version used for this assessment
    pub policy_version: String,

    /// Rule that decided the route, or `DEFAULT`
    pub rule_id: String,

    #[serde(flatten)]
    pub assessment: Assessment,
}

impl AssessmentResponse {
    pub fn new(evaluation: Evaluation, policy_version: String) -> Self {
        AssessmentResponse {
            assessment_id: Uuid::new_v4(),
            assessed_at: Utc::now(),
            policy_version,
            rule_id: evaluation.rule_id,
            assessment: evaluation.assessment,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub policy_version: String,
    pub uptime_secs: u64,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub policy_version: String,
    pub rules: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            code: code.into(),
        }
    }

    pub fn not_ready(message: impl Into<String>) -> Self {
        ErrorResponse::new(message, "NOT_READY")
    }
}
