use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reportguard API",
        version = "1.0.0",
        description = "Consistency checks and automated amendments for property valuation reports.",
    ),
    paths(
        handlers::health::health_check,
        handlers::reports::check_report,
        handlers::reports::amend_report,
        handlers::reports::review_report,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // Reports
        dto::CheckReportRequest,
        dto::CheckReportResponse,
        dto::AmendReportRequest,
        dto::AmendReportResponse,
        dto::ReviewReportRequest,
        dto::ReviewReportResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "reports", description = "Report contradiction checks, amendments and reviews"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
