use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::features::reports::handlers::send_report;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
///
/// `/send-report` is the path the dashboard posts to; `/api/reports/send`
/// is the same handler under the API prefix.
pub fn routes(report_service: Arc<ReportService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/send-report",
            post(send_report).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route(
            "/api/reports/send",
            post(send_report).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .with_state(report_service)
}
