pub(crate) mod health;
pub mod reports;

pub use health::health_check;

use crate::api::v1::response::ApiResponse;
use crate::error::ReportGuardError;

/// Fallback for unknown paths.
pub async fn not_found(uri: axum::http::Uri) -> ApiResponse<()> {
    ReportGuardError::NotFound(format!("No route for {}", uri.path())).into()
}
