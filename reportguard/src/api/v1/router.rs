use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let reports = Router::new()
        .route("/reports:check", post(handlers::reports::check_report))
        .route("/reports:amend", post(handlers::reports::amend_report))
        .route("/reports:review", post(handlers::reports::review_report));

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    Router::new().merge(public_routes).merge(reports)
}
