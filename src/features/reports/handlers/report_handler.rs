use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{ReportRequestDto, SendReportResponseDto};
use crate::features::reports::services::ReportService;
use crate::shared::types::ApiResponse;

/// Generate a track analysis report and email it
///
/// Missing charts or CSV data do not fail the request; the email shows a
/// placeholder for each unavailable asset instead.
#[utoipa::path(
    post,
    path = "/send-report",
    tag = "reports",
    request_body = ReportRequestDto,
    responses(
        (status = 200, description = "Report email sent", body = ApiResponse<SendReportResponseDto>),
        (status = 400, description = "Missing song_name/artist or malformed JSON"),
        (status = 413, description = "Payload too large"),
        (status = 500, description = "Mail dispatch failed")
    )
)]
pub async fn send_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<ReportRequestDto>,
) -> Result<Json<ApiResponse<SendReportResponseDto>>> {
    let response = service.send_report(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Report sent successfully".to_string()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AssetStrategy;
    use crate::features::reports::routes;
    use crate::features::reports::services::{AssetResolver, ReportComposer};
    use crate::modules::assets::HttpAssetFetcher;
    use crate::shared::test_helpers::{
        encoded_payload, test_asset_config, test_mail_config, RecordingMailer,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn test_server(
        mailer: Arc<RecordingMailer>,
        max_body_size: usize,
        max_payload_size: usize,
    ) -> TestServer {
        let fetcher = HttpAssetFetcher::new(Duration::from_secs(2)).unwrap();
        let service = Arc::new(ReportService::new(
            AssetResolver::new(
                // Nothing listens on the discard port, so every fetch fails fast
                test_asset_config("http://127.0.0.1:9", AssetStrategy::Embed),
                Arc::new(fetcher),
            ),
            ReportComposer::new(test_mail_config()),
            mailer,
            max_payload_size,
        ));

        TestServer::new(routes(service, max_body_size)).unwrap()
    }

    #[tokio::test]
    async fn test_send_report_success() {
        let mailer = Arc::new(RecordingMailer::default());
        let server = test_server(mailer.clone(), 1024 * 1024, 1024 * 1024);

        let response = server
            .post("/send-report")
            .json(&json!({ "song_name": "Test Song", "artist": "Test Artist" }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_send_report_alias_route() {
        let mailer = Arc::new(RecordingMailer::default());
        let server = test_server(mailer.clone(), 1024 * 1024, 1024 * 1024);

        server
            .post("/api/reports/send")
            .json(&json!({ "song_name": "Test Song", "artist": "Test Artist" }))
            .await
            .assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_song_name_is_bad_request() {
        let mailer = Arc::new(RecordingMailer::default());
        let server = test_server(mailer.clone(), 1024 * 1024, 1024 * 1024);

        let response = server
            .post("/send-report")
            .json(&json!({ "artist": "Test Artist" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let mailer = Arc::new(RecordingMailer::default());
        let server = test_server(mailer, 1024 * 1024, 1024 * 1024);

        server
            .post("/send-report")
            .content_type("application/json")
            .text("{ not json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_body_over_limit_is_payload_too_large() {
        let mailer = Arc::new(RecordingMailer::default());
        let server = test_server(mailer.clone(), 1024, 1024 * 1024);

        let response = server
            .post("/send-report")
            .json(&json!({
                "song_name": "Test Song",
                "artist": "Test Artist",
                "spotontrack_image_base64": encoded_payload(4096)
            }))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_serialized_payload_over_limit_is_payload_too_large() {
        let mailer = Arc::new(RecordingMailer::default());
        let server = test_server(mailer.clone(), 1024 * 1024, 1024);

        server
            .post("/send-report")
            .json(&json!({
                "song_name": "Test Song",
                "artist": "Test Artist",
                "mediaforest_image_base64": encoded_payload(4096)
            }))
            .await
            .assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_server_error() {
        let mailer = Arc::new(RecordingMailer::failing("535 authentication failed"));
        let server = test_server(mailer, 1024 * 1024, 1024 * 1024);

        let response = server
            .post("/send-report")
            .json(&json!({ "song_name": "Test Song", "artist": "Test Artist" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("535"));
    }
}
