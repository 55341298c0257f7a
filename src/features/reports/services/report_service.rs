use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{ReportRequestDto, SendReportResponseDto};
use crate::features::reports::services::{AssetResolver, ReportComposer};
use crate::modules::mail::MailDispatcher;

/// Service for generating and sending track analysis reports
pub struct ReportService {
    resolver: AssetResolver,
    composer: ReportComposer,
    mailer: Arc<dyn MailDispatcher>,
    max_payload_size: usize,
}

impl ReportService {
    pub fn new(
        resolver: AssetResolver,
        composer: ReportComposer,
        mailer: Arc<dyn MailDispatcher>,
        max_payload_size: usize,
    ) -> Self {
        Self {
            resolver,
            composer,
            mailer,
            max_payload_size,
        }
    }

    /// Resolve assets, compose the report and dispatch it in one call.
    ///
    /// Size and input checks run before any outbound request. Dispatch
    /// failures are returned as-is and never retried.
    pub async fn send_report(&self, request: ReportRequestDto) -> Result<SendReportResponseDto> {
        let payload_size = serde_json::to_vec(&request)
            .map_err(|e| AppError::Internal(format!("Failed to measure report payload: {}", e)))?
            .len();
        if payload_size > self.max_payload_size {
            return Err(AppError::PayloadTooLarge(format!(
                "Report payload is {} bytes, maximum is {} bytes ({} MB)",
                payload_size,
                self.max_payload_size,
                self.max_payload_size / 1024 / 1024
            )));
        }

        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        info!(
            song_name = request.song_name.as_deref().unwrap_or_default(),
            artist = request.artist.as_deref().unwrap_or_default(),
            payload_size,
            "Received report request"
        );

        let assets = self.resolver.resolve(&request).await?;
        let email = self.composer.compose(&request, &assets)?;

        self.mailer.send(&email).await?;

        info!(
            subject = %email.subject,
            transport = self.mailer.transport_name(),
            "Report email sent"
        );

        Ok(SendReportResponseDto::ok())
    }
}
