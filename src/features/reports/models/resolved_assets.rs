use std::fmt;

use crate::shared::constants::MIN_IMAGE_PAYLOAD_LEN;

/// One of the three asset positions in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    /// Spotontrack Spotify chart
    PrimaryChartImage,
    /// Mediaforest radio chart
    SecondaryChartImage,
    /// TikTok performance CSV
    PlatformDataFile,
}

impl AssetSlot {
    pub const ALL: [AssetSlot; 3] = [
        AssetSlot::PrimaryChartImage,
        AssetSlot::SecondaryChartImage,
        AssetSlot::PlatformDataFile,
    ];

    pub fn is_image(self) -> bool {
        !matches!(self, AssetSlot::PlatformDataFile)
    }

    /// Whether an encoded payload of `len` characters is worth embedding.
    /// Images need strictly more than [`MIN_IMAGE_PAYLOAD_LEN`], the data file anything non-empty.
    pub fn accepts_payload_len(self, len: usize) -> bool {
        if self.is_image() {
            len > MIN_IMAGE_PAYLOAD_LEN
        } else {
            len > 0
        }
    }
}

impl fmt::Display for AssetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetSlot::PrimaryChartImage => "spotontrack_image",
            AssetSlot::SecondaryChartImage => "mediaforest_image",
            AssetSlot::PlatformDataFile => "tiktok_csv",
        };
        f.write_str(name)
    }
}

/// Resolution outcome for a single slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    /// Base64 payload without any data-URI prefix
    Encoded(String),
    /// Locator the mail client loads by itself
    Remote(String),
    Unavailable,
}

impl SlotValue {
    pub fn is_available(&self) -> bool {
        !matches!(self, SlotValue::Unavailable)
    }
}

/// The three resolved assets for one report request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssets {
    pub primary_chart_image: SlotValue,
    pub secondary_chart_image: SlotValue,
    pub platform_data_file: SlotValue,
}

impl ResolvedAssets {
    pub fn get(&self, slot: AssetSlot) -> &SlotValue {
        match slot {
            AssetSlot::PrimaryChartImage => &self.primary_chart_image,
            AssetSlot::SecondaryChartImage => &self.secondary_chart_image,
            AssetSlot::PlatformDataFile => &self.platform_data_file,
        }
    }
}
