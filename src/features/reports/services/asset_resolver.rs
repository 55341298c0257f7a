use base64::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::config::{AssetConfig, AssetStrategy};
use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::ReportRequestDto;
use crate::features::reports::models::{AssetSlot, ResolvedAssets, SlotValue};
use crate::modules::assets::AssetFetcher;
use crate::shared::validation::underscore_whitespace;

/// Strip a `data:<mime>;base64,` header, keeping everything after the first comma
pub fn strip_data_uri_prefix(value: &str) -> &str {
    if value.starts_with("data:") {
        if let Some((_, payload)) = value.split_once(',') {
            return payload;
        }
    }
    value
}

/// Fills the three report asset slots from the request or the asset origin
pub struct AssetResolver {
    config: AssetConfig,
    fetcher: Arc<dyn AssetFetcher>,
}

impl AssetResolver {
    pub fn new(config: AssetConfig, fetcher: Arc<dyn AssetFetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Resolve all slots concurrently.
    ///
    /// Fetch failures degrade a slot to [`SlotValue::Unavailable`]; the only
    /// error is a request lacking the track identity needed for a fallback locator.
    pub async fn resolve(&self, request: &ReportRequestDto) -> Result<ResolvedAssets> {
        let (primary, secondary, data_file) = futures::join!(
            self.resolve_slot(request, AssetSlot::PrimaryChartImage),
            self.resolve_slot(request, AssetSlot::SecondaryChartImage),
            self.resolve_slot(request, AssetSlot::PlatformDataFile),
        );

        Ok(ResolvedAssets {
            primary_chart_image: primary?,
            secondary_chart_image: secondary?,
            platform_data_file: data_file?,
        })
    }

    async fn resolve_slot(&self, request: &ReportRequestDto, slot: AssetSlot) -> Result<SlotValue> {
        // A supplied payload is final, even when it later fails validation
        if let Some(encoded) = request.encoded_asset(slot) {
            debug!(%slot, len = encoded.len(), "Using encoded asset supplied by client");
            return Ok(Self::finalize(slot, encoded));
        }

        let locator = match request.direct_url(slot) {
            Some(url) => url.to_string(),
            None => self.fallback_locator(request, slot)?,
        };

        match self.config.strategy {
            AssetStrategy::Link => {
                info!(%slot, %locator, "Passing asset locator through");
                Ok(SlotValue::Remote(locator))
            }
            AssetStrategy::Embed => {
                info!(%slot, %locator, "Fetching asset from origin");
                let encoded = self.fetch_encoded(slot, &locator).await;
                Ok(Self::finalize(slot, &encoded))
            }
        }
    }

    /// Deterministic origin locator for `slot` derived from the track identity
    pub fn fallback_locator(&self, request: &ReportRequestDto, slot: AssetSlot) -> Result<String> {
        let (song_name, artist) = request.track_identity().ok_or_else(|| {
            AppError::Validation(
                "song_name and artist are required to build asset locators".to_string(),
            )
        })?;

        let base = &self.config.base_url;
        let locator = match slot {
            AssetSlot::PrimaryChartImage => format!(
                "{}/images/{}_{}_spotontrack_spotify.png",
                base,
                underscore_whitespace(song_name),
                underscore_whitespace(artist)
            ),
            AssetSlot::SecondaryChartImage => format!(
                "{}/images/{}_{}_mediaforest.png",
                base,
                underscore_whitespace(song_name),
                underscore_whitespace(artist)
            ),
            AssetSlot::PlatformDataFile => format!(
                "{}/download?song={}&artist={}",
                base,
                urlencoding::encode(song_name),
                urlencoding::encode(artist)
            ),
        };

        Ok(locator)
    }

    /// Fetch and base64-encode; any failure yields an empty payload
    async fn fetch_encoded(&self, slot: AssetSlot, url: &str) -> String {
        match self.fetcher.fetch(url).await {
            Ok(bytes) => BASE64_STANDARD.encode(bytes),
            Err(e) => {
                warn!(%slot, error = %e, "Failed to fetch asset, marking unavailable");
                String::new()
            }
        }
    }

    fn finalize(slot: AssetSlot, encoded: &str) -> SlotValue {
        let payload = strip_data_uri_prefix(encoded);
        let usable = slot.accepts_payload_len(payload.len());

        info!(
            %slot,
            raw_len = encoded.len(),
            payload_len = payload.len(),
            usable,
            "Asset resolved"
        );

        if usable {
            SlotValue::Encoded(payload.to_string())
        } else {
            SlotValue::Unavailable
        }
    }
}
