use crate::config::{CropConfig, ExportFormat};
use crate::error::Result;
use crate::surface::{EventSurface, Subscription, DRAG_LISTENERS, RESIZE_LISTENERS};

use super::controller::{CropController, CropEvent, CropState};
use super::export::{export_selection, EncodedImage, ImageSource};
use super::rect::CropRect;

/// One live cropper: reducer state plus the listener subscriptions it owns.
///
/// A resize subscription is held while an image is bound; drag listeners
/// are held only between a handle press and its release. Dropping the
/// cropper releases both.
pub struct Cropper<S: EventSurface> {
    controller: CropController,
    state: CropState,
    surface: S,
    resize_listeners: Option<Subscription>,
    drag_listeners: Option<Subscription>,
}

impl<S: EventSurface> Cropper<S> {
    pub fn new(surface: S, config: CropConfig, aspect_ratio: f32) -> Self {
        Self {
            controller: CropController::new(config),
            state: CropState::new(aspect_ratio),
            surface,
            resize_listeners: None,
            drag_listeners: None,
        }
    }

    pub fn state(&self) -> &CropState {
        &self.state
    }

    pub fn rect(&self) -> Option<CropRect> {
        self.state.rect
    }

    pub fn is_listening_for_resize(&self) -> bool {
        self.resize_listeners.is_some()
    }

    pub fn is_listening_for_drag(&self) -> bool {
        self.drag_listeners.is_some()
    }

    pub fn dispatch(&mut self, event: CropEvent) -> &CropState {
        self.state = self.controller.apply(&self.state, &event);
        self.sync_listeners();
        &self.state
    }

    pub fn export<I: ImageSource + ?Sized>(
        &self,
        source: &I,
        format: ExportFormat,
    ) -> Result<EncodedImage> {
        export_selection(&self.state, source, format)
    }

    fn sync_listeners(&mut self) {
        let bound = self.state.natural.is_some();
        sync(&self.surface, &mut self.resize_listeners, bound, RESIZE_LISTENERS);
        sync(
            &self.surface,
            &mut self.drag_listeners,
            self.state.is_dragging(),
            DRAG_LISTENERS,
        );
    }
}

fn sync<S: EventSurface>(
    surface: &S,
    slot: &mut Option<Subscription>,
    wanted: bool,
    kinds: &[crate::surface::ListenerKind],
) {
    if wanted && slot.is_none() {
        *slot = Some(surface.subscribe(kinds));
    } else if !wanted {
        if let Some(sub) = slot.take() {
            sub.release();
        }
    }
}
