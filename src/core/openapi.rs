use utoipa::{Modify, OpenApi};

use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::send_report,
    ),
    components(
        schemas(
            reports_dtos::MetricValue,
            reports_dtos::ReportRequestDto,
            reports_dtos::SendReportResponseDto,
            ApiResponse<reports_dtos::SendReportResponseDto>,
        )
    ),
    tags(
        (name = "reports", description = "Track analysis report generation and delivery"),
    ),
    info(
        title = "SongScape Mailer API",
        version = "0.1.0",
        description = "Track analysis report mailer",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
