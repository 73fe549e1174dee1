use figurine_core::config::CropConfig;
use figurine_core::crop::{AspectPreset, CropEvent, Cropper, PixelRegion};
use figurine_core::geometry::Size;
use figurine_core::surface::PolledSurface;

/// Crop mode state: the live cropper and the selected aspect preset.
pub struct CropPanelState {
    pub cropper: Cropper<PolledSurface>,
    pub preset: AspectPreset,
}

impl CropPanelState {
    pub fn new(config: &CropConfig, preset: AspectPreset) -> Self {
        Self {
            cropper: Cropper::new(PolledSurface, config.clone(), preset.ratio()),
            preset,
        }
    }

    /// Feed the current panel size to the cropper when it changed.
    pub fn sync_container(&mut self, size: Size) {
        if self.cropper.state().container != Some(size) {
            self.cropper.dispatch(CropEvent::ContainerResized(size));
        }
    }

    pub fn set_preset(&mut self, preset: AspectPreset) {
        self.preset = preset;
        self.cropper.dispatch(CropEvent::SetAspectRatio(preset.ratio()));
    }

    /// The committed selection in natural image pixels.
    pub fn selection(&self) -> Option<PixelRegion> {
        let state = self.cropper.state();
        let (rect, fitted, natural) = (state.rect?, state.fitted?, state.natural?);
        Some(PixelRegion::from_display(
            &rect,
            &fitted,
            natural.width as u32,
            natural.height as u32,
        ))
    }
}
