/// Rendered in place of any metric the request left out
pub const METRIC_PLACEHOLDER: &str = "-";

/// Encoded image payloads must be strictly longer than this to be embedded.
/// Shorter values are truncated or placeholder responses from the origin.
pub const MIN_IMAGE_PAYLOAD_LEN: usize = 100;

/// File name of the TikTok CSV attached to (and offered for download in) the report
pub const TIKTOK_CSV_FILENAME: &str = "TikTokPerformance.csv";

/// User agent sent to the asset origin
pub const ASSET_FETCH_USER_AGENT: &str = "SongScapeMailer/1.0 (track-report)";
