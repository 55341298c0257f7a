mod resolved_assets;

pub use resolved_assets::{AssetSlot, ResolvedAssets, SlotValue};
