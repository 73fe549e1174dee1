use std::collections::BTreeMap;

use figurine_core::config::ViewportConfig;
use figurine_core::geometry::Point;
use figurine_core::surface::PolledSurface;
use figurine_core::viewport::Viewport;

/// Viewport display state.
pub struct PreviewState {
    pub texture: Option<egui::TextureHandle>,
    /// Natural size of the loaded image (the texture may be downscaled).
    pub image_size: Option<[u32; 2]>,
    pub viewport: Viewport<PolledSurface>,
    /// Touch contacts currently on the surface.
    pub touches: BTreeMap<egui::TouchId, Point>,
    pub viewing_label: String,
}

impl PreviewState {
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            texture: None,
            image_size: None,
            viewport: Viewport::new(PolledSurface, config.clone()),
            touches: BTreeMap::new(),
            viewing_label: String::new(),
        }
    }

    pub fn contacts(&self) -> Vec<Point> {
        self.touches.values().copied().collect()
    }
}
