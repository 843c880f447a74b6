//! Report check/amend/review request and response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Amendment, AmendmentResult, ContradictionResult, ReportData};
use crate::services::ReviewOutcome;

/// Request body for `POST /api/v1/reports:check`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckReportRequest {
    /// Report snapshot to check. Unknown fields are ignored by the rules.
    #[schema(value_type = Object)]
    pub report_data: ReportData,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckReportResponse {
    /// `{hasContradictions, contradictions: [string], warnings: [string]}`
    #[schema(value_type = Object)]
    pub result: ContradictionResult,
    /// Text rendering of `result`.
    pub report: String,
    #[schema(value_type = String)]
    pub checked_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/reports:amend`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmendReportRequest {
    #[schema(value_type = Object)]
    pub report_data: ReportData,
    /// Result of an earlier check. The report is checked first when absent.
    #[schema(value_type = Option<Object>)]
    pub contradictions: Option<ContradictionResult>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmendReportResponse {
    /// True when at least one amendment was applied.
    pub success: bool,
    #[schema(value_type = Object)]
    pub amended_data: ReportData,
    #[schema(value_type = Vec<Object>)]
    pub amendments: Vec<Amendment>,
    pub remaining_contradictions: Vec<String>,
    /// Same entries as `remainingContradictions`.
    pub failed_amendments: Vec<String>,
    #[schema(value_type = String)]
    pub amended_at: DateTime<Utc>,
}

impl AmendReportResponse {
    pub fn new(result: AmendmentResult, amended_at: DateTime<Utc>) -> Self {
        Self {
            remaining_contradictions: result.remaining_contradictions().to_vec(),
            failed_amendments: result.failed_amendments().to_vec(),
            success: result.success,
            amended_data: result.amended_data,
            amendments: result.amendments,
            amended_at,
        }
    }
}

/// Request body for `POST /api/v1/reports:review`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReportRequest {
    #[schema(value_type = Object)]
    pub report_data: ReportData,
    /// Check/amend rounds, 1-10. Defaults to the server setting.
    #[validate(range(min = 1, max = 10))]
    #[schema(minimum = 1, maximum = 10)]
    pub max_passes: Option<u32>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReportResponse {
    #[schema(value_type = String)]
    pub review_id: Uuid,
    #[schema(value_type = Object)]
    pub initial: ContradictionResult,
    /// Amendments from every pass; unresolved entries from the last pass.
    #[schema(value_type = Object)]
    pub amendment: AmendmentResult,
    /// Check of the amended report, when re-checking is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub final_check: Option<ContradictionResult>,
    pub passes: u32,
    pub report: String,
    #[schema(value_type = String)]
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewReportResponse {
    pub fn new(outcome: ReviewOutcome, reviewed_at: DateTime<Utc>) -> Self {
        Self {
            review_id: outcome.review_id,
            initial: outcome.initial,
            amendment: outcome.amendment,
            final_check: outcome.final_check,
            passes: outcome.passes,
            report: outcome.report,
            reviewed_at,
        }
    }
}
