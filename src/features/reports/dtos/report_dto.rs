use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::reports::models::AssetSlot;
use crate::shared::validation::NON_BLANK_REGEX;

/// A metric as sent by the dashboard: either a preformatted string or a raw number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Display form, or `None` when the value carries nothing to show
    pub fn display(&self) -> Option<String> {
        match self {
            MetricValue::Integer(n) => Some(n.to_string()),
            MetricValue::Float(n) => Some(n.to_string()),
            MetricValue::Text(s) if s.trim().is_empty() => None,
            MetricValue::Text(s) => Some(s.clone()),
        }
    }
}

/// Report generation request
///
/// Only `song_name` and `artist` are required. Asset fields may carry an
/// inline base64 payload (optionally as a data URI) or a direct URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReportRequestDto {
    #[validate(
        required(message = "song_name is required"),
        regex(path = *NON_BLANK_REGEX, message = "song_name must not be blank")
    )]
    #[schema(example = "Test Song")]
    pub song_name: Option<String>,

    #[validate(
        required(message = "artist is required"),
        regex(path = *NON_BLANK_REGEX, message = "artist must not be blank")
    )]
    #[schema(example = "Test Artist")]
    pub artist: Option<String>,

    // YouTube
    pub youtube_title: Option<MetricValue>,
    pub youtube_views: Option<MetricValue>,
    pub youtube_diff: Option<MetricValue>,
    pub youtube_daily_avg: Option<MetricValue>,
    pub youtube_weekly_avg: Option<MetricValue>,

    // Spotify
    pub spotify_title: Option<MetricValue>,
    pub spotify_streams: Option<MetricValue>,
    pub spotify_diff: Option<MetricValue>,
    pub spotify_daily_avg: Option<MetricValue>,
    pub spotify_weekly_avg: Option<MetricValue>,

    // Shazam
    pub shazam_title: Option<MetricValue>,
    pub shazam_count: Option<MetricValue>,
    pub shazam_diff: Option<MetricValue>,
    pub shazam_daily_avg: Option<MetricValue>,
    pub shazam_weekly_avg: Option<MetricValue>,

    /// Free-text TikTok summary from Chartex
    pub chartex_stats: Option<MetricValue>,

    // TikTok lifetime counters
    #[serde(rename = "totalTikTokVideos")]
    pub total_tiktok_videos: Option<MetricValue>,
    #[serde(rename = "totalTikTokViews")]
    pub total_tiktok_views: Option<MetricValue>,
    #[serde(rename = "totalTikTokLikes")]
    pub total_tiktok_likes: Option<MetricValue>,
    #[serde(rename = "totalTikTokComments")]
    pub total_tiktok_comments: Option<MetricValue>,
    #[serde(rename = "totalTikTokShares")]
    pub total_tiktok_shares: Option<MetricValue>,

    // Inline-encoded assets
    pub spotontrack_image_base64: Option<String>,
    pub mediaforest_image_base64: Option<String>,
    pub tiktok_csv_base64: Option<String>,

    // Direct locators
    pub spotontrack_direct_url: Option<String>,
    pub mediaforest_direct_url: Option<String>,
    pub tiktok_csv_direct_url: Option<String>,
}

/// Treat `null`, absent and empty identically
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl ReportRequestDto {
    /// `(song_name, artist)` when both are present and non-blank
    pub fn track_identity(&self) -> Option<(&str, &str)> {
        match (supplied(&self.song_name), supplied(&self.artist)) {
            (Some(song), Some(artist)) => Some((song, artist)),
            _ => None,
        }
    }

    /// Inline payload supplied for `slot`, if any
    pub fn encoded_asset(&self, slot: AssetSlot) -> Option<&str> {
        supplied(match slot {
            AssetSlot::PrimaryChartImage => &self.spotontrack_image_base64,
            AssetSlot::SecondaryChartImage => &self.mediaforest_image_base64,
            AssetSlot::PlatformDataFile => &self.tiktok_csv_base64,
        })
    }

    /// Direct URL supplied for `slot`, if any
    pub fn direct_url(&self, slot: AssetSlot) -> Option<&str> {
        supplied(match slot {
            AssetSlot::PrimaryChartImage => &self.spotontrack_direct_url,
            AssetSlot::SecondaryChartImage => &self.mediaforest_direct_url,
            AssetSlot::PlatformDataFile => &self.tiktok_csv_direct_url,
        })
    }
}

/// Acknowledgment returned once the report email has been handed off
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendReportResponseDto {
    #[schema(example = "ok")]
    pub status: String,
}

impl SendReportResponseDto {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_value_accepts_strings_and_numbers() {
        let dto: ReportRequestDto = serde_json::from_value(json!({
            "song_name": "Test Song",
            "artist": "Test Artist",
            "youtube_views": "1,234",
            "spotify_streams": 98765,
            "shazam_diff": 2.5,
            "totalTikTokViews": 0
        }))
        .unwrap();

        assert_eq!(dto.youtube_views.unwrap().display().as_deref(), Some("1,234"));
        assert_eq!(dto.spotify_streams.unwrap().display().as_deref(), Some("98765"));
        assert_eq!(dto.shazam_diff.unwrap().display().as_deref(), Some("2.5"));
        assert_eq!(dto.total_tiktok_views.unwrap().display().as_deref(), Some("0"));
    }

    #[test]
    fn test_blank_text_metric_has_no_display() {
        assert_eq!(MetricValue::Text(String::new()).display(), None);
        assert_eq!(MetricValue::Text("   ".into()).display(), None);
    }

    #[test]
    fn test_validation_requires_track_identity() {
        let missing: ReportRequestDto = serde_json::from_value(json!({ "artist": "A" })).unwrap();
        assert!(missing.validate().is_err());

        let blank: ReportRequestDto =
            serde_json::from_value(json!({ "song_name": "  ", "artist": "A" })).unwrap();
        assert!(blank.validate().is_err());

        let ok: ReportRequestDto =
            serde_json::from_value(json!({ "song_name": "S", "artist": "A" })).unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.track_identity(), Some(("S", "A")));
    }

    #[test]
    fn test_empty_and_null_assets_are_not_supplied() {
        let dto: ReportRequestDto = serde_json::from_value(json!({
            "song_name": "S",
            "artist": "A",
            "spotontrack_image_base64": "",
            "mediaforest_image_base64": null,
            "tiktok_csv_direct_url": "https://cdn.example.com/tiktok.csv"
        }))
        .unwrap();

        assert_eq!(dto.encoded_asset(AssetSlot::PrimaryChartImage), None);
        assert_eq!(dto.encoded_asset(AssetSlot::SecondaryChartImage), None);
        assert_eq!(dto.encoded_asset(AssetSlot::PlatformDataFile), None);
        assert_eq!(
            dto.direct_url(AssetSlot::PlatformDataFile),
            Some("https://cdn.example.com/tiktok.csv")
        );
    }
}
