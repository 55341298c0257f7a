use base64::prelude::*;
use chrono::Utc;
use minijinja::Value;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::config::MailConfig;
use crate::core::error::Result;
use crate::features::reports::dtos::{MetricValue, ReportRequestDto};
use crate::features::reports::models::{ResolvedAssets, SlotValue};
use crate::modules::mail::{EmailAttachment, OutgoingEmail};
use crate::shared::constants::{METRIC_PLACEHOLDER, TIKTOK_CSV_FILENAME};
use crate::shared::templates::render_template;

const REPORT_TEMPLATE: &str = "email/track_report.html.jinja";

/// Display a metric, falling back to the placeholder
pub fn display_metric(value: Option<&MetricValue>) -> String {
    value
        .and_then(MetricValue::display)
        .unwrap_or_else(|| METRIC_PLACEHOLDER.to_string())
}

/// Guess the image MIME type from the first bytes of its base64 payload
fn image_mime_for_payload(payload: &str) -> &'static str {
    if payload.starts_with("/9j/") {
        "image/jpeg"
    } else if payload.starts_with("R0lGOD") {
        "image/gif"
    } else if payload.starts_with("UklGR") {
        "image/webp"
    } else {
        "image/png"
    }
}

#[derive(Debug, Serialize)]
struct MetricRow {
    label: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct PlatformSection {
    name: &'static str,
    rows: Vec<MetricRow>,
}

#[derive(Debug, Serialize)]
struct AssetView {
    available: bool,
    src: String,
}

impl AssetView {
    fn from_slot(value: &SlotValue, mime: impl FnOnce(&str) -> &'static str) -> Self {
        match value {
            SlotValue::Encoded(payload) => Self {
                available: true,
                src: format!("data:{};base64,{}", mime(payload), payload),
            },
            SlotValue::Remote(url) => Self {
                available: true,
                src: url.clone(),
            },
            SlotValue::Unavailable => Self {
                available: false,
                src: String::new(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportView {
    song_name: String,
    artist: String,
    platforms: Vec<PlatformSection>,
    chartex_stats: String,
    tiktok_totals: Vec<MetricRow>,
    spotontrack: AssetView,
    mediaforest: AssetView,
    tiktok_csv: AssetView,
    csv_filename: &'static str,
    from_name: String,
    generated_at: String,
}

fn row(label: &'static str, value: &Option<MetricValue>) -> MetricRow {
    MetricRow {
        label,
        value: display_metric(value.as_ref()),
    }
}

fn dsp_section(
    name: &'static str,
    count_label: &'static str,
    values: [&Option<MetricValue>; 5],
) -> PlatformSection {
    let [title, count, diff, daily, weekly] = values;
    PlatformSection {
        name,
        rows: vec![
            row("Title", title),
            row(count_label, count),
            row("Difference since last check", diff),
            row("Daily average (today)", daily),
            row("Weekly average (last 7 days)", weekly),
        ],
    }
}

/// Renders the report email from resolved assets and request metrics
pub struct ReportComposer {
    mail: MailConfig,
}

impl ReportComposer {
    pub fn new(mail: MailConfig) -> Self {
        Self { mail }
    }

    pub fn subject_for(song_name: &str) -> String {
        format!("{} Analysis Report", song_name)
    }

    pub fn compose(
        &self,
        request: &ReportRequestDto,
        assets: &ResolvedAssets,
    ) -> Result<OutgoingEmail> {
        let song_name = request.song_name.clone().unwrap_or_default();
        let artist = request.artist.clone().unwrap_or_default();

        let view = ReportView {
            platforms: vec![
                dsp_section(
                    "YouTube",
                    "Views",
                    [
                        &request.youtube_title,
                        &request.youtube_views,
                        &request.youtube_diff,
                        &request.youtube_daily_avg,
                        &request.youtube_weekly_avg,
                    ],
                ),
                dsp_section(
                    "Spotify",
                    "Streams",
                    [
                        &request.spotify_title,
                        &request.spotify_streams,
                        &request.spotify_diff,
                        &request.spotify_daily_avg,
                        &request.spotify_weekly_avg,
                    ],
                ),
                dsp_section(
                    "Shazam",
                    "Count",
                    [
                        &request.shazam_title,
                        &request.shazam_count,
                        &request.shazam_diff,
                        &request.shazam_daily_avg,
                        &request.shazam_weekly_avg,
                    ],
                ),
            ],
            chartex_stats: display_metric(request.chartex_stats.as_ref()),
            tiktok_totals: vec![
                row("Total Videos", &request.total_tiktok_videos),
                row("Total Views", &request.total_tiktok_views),
                row("Total Likes", &request.total_tiktok_likes),
                row("Total Comments", &request.total_tiktok_comments),
                row("Total Shares", &request.total_tiktok_shares),
            ],
            spotontrack: AssetView::from_slot(&assets.primary_chart_image, image_mime_for_payload),
            mediaforest: AssetView::from_slot(
                &assets.secondary_chart_image,
                image_mime_for_payload,
            ),
            tiktok_csv: AssetView::from_slot(&assets.platform_data_file, |_| "text/csv"),
            csv_filename: TIKTOK_CSV_FILENAME,
            from_name: self.mail.from_name.clone(),
            generated_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
            song_name,
            artist,
        };

        let html_body = render_template(REPORT_TEMPLATE, Value::from_serialize(&view))?;
        debug!(len = html_body.len(), "Rendered report body");

        Ok(OutgoingEmail {
            from: self.mail.from_header(),
            to: self.mail.recipient.clone(),
            subject: Self::subject_for(&view.song_name),
            html_body,
            attachments: csv_attachment(&assets.platform_data_file).into_iter().collect(),
        })
    }
}

/// Decoded CSV attachment for an encoded data-file slot
fn csv_attachment(value: &SlotValue) -> Option<EmailAttachment> {
    let SlotValue::Encoded(payload) = value else {
        return None;
    };

    match BASE64_STANDARD.decode(payload) {
        Ok(content) => Some(EmailAttachment {
            filename: TIKTOK_CSV_FILENAME.to_string(),
            content_type: "text/csv".to_string(),
            content,
        }),
        Err(e) => {
            warn!(error = %e, "TikTok CSV payload is not valid base64, skipping attachment");
            None
        }
    }
}
