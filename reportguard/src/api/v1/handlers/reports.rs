//! v1 Report handlers.

use axum::extract::State;
use chrono::Utc;
use validator::Validate;

use crate::api::v1::dto::{
    AmendReportRequest, AmendReportResponse, CheckReportRequest, CheckReportResponse,
    ReviewReportRequest, ReviewReportResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::{AppJson, AppState};
use crate::review::generate_contradiction_report;

/// `POST /api/v1/reports:check`
#[utoipa::path(
    post,
    path = "/api/v1/reports:check",
    tag = "reports",
    operation_id = "reports.check",
    request_body = CheckReportRequest,
    responses(
        (status = 200, description = "Check result", body = CheckReportResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn check_report(
    State(state): State<AppState>,
    AppJson(req): AppJson<CheckReportRequest>,
) -> ApiResponse<CheckReportResponse> {
    let result = state.review.check(&req.report_data);
    let report = generate_contradiction_report(&result);

    ApiResponse::success(CheckReportResponse {
        result,
        report,
        checked_at: Utc::now(),
    })
}

/// `POST /api/v1/reports:amend`
///
/// Contradictions the amender cannot fix come back in
/// `remainingContradictions`; they are not an error.
#[utoipa::path(
    post,
    path = "/api/v1/reports:amend",
    tag = "reports",
    operation_id = "reports.amend",
    request_body = AmendReportRequest,
    responses(
        (status = 200, description = "Amendment result", body = AmendReportResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn amend_report(
    State(state): State<AppState>,
    AppJson(req): AppJson<AmendReportRequest>,
) -> ApiResponse<AmendReportResponse> {
    let result = state
        .review
        .amend(&req.report_data, req.contradictions)
        .await;

    ApiResponse::success(AmendReportResponse::new(result, Utc::now()))
}

/// `POST /api/v1/reports:review`
#[utoipa::path(
    post,
    path = "/api/v1/reports:review",
    tag = "reports",
    operation_id = "reports.review",
    request_body = ReviewReportRequest,
    responses(
        (status = 200, description = "Review outcome", body = ReviewReportResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn review_report(
    State(state): State<AppState>,
    AppJson(req): AppJson<ReviewReportRequest>,
) -> ApiResponse<ReviewReportResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    let outcome = state.review.review(&req.report_data, req.max_passes).await;

    ApiResponse::success(ReviewReportResponse::new(outcome, Utc::now()))
}
