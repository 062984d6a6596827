//! Canvas configuration.

use crate::placement::PlacementPolicy;
use kurbo::Size;

/// Storage key the layout is saved under.
pub const LAYOUT_STORAGE_KEY: &str = "componentLayout";

/// Canvas settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Canvas extent in pixels. Widgets never leave it.
    pub size: Size,
    /// Key the layout is saved under.
    pub storage_key: String,
    pub placement: PlacementPolicy,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: Size::new(800.0, 600.0),
            storage_key: LAYOUT_STORAGE_KEY.to_string(),
            placement: PlacementPolicy::default(),
        }
    }
}

impl CanvasConfig {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_placement(mut self, placement: PlacementPolicy) -> Self {
        self.placement = placement;
        self
    }
}
