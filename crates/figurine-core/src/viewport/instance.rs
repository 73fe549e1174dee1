use crate::config::ViewportConfig;
use crate::surface::{EventSurface, Subscription, DRAG_LISTENERS};

use super::controller::{CursorHint, ViewportController, ViewportEvent, ViewportState};
use super::transform::TransformDescriptor;

/// One live viewport: reducer state plus the listener subscription held
/// while a gesture is in progress.
///
/// Dropping the viewport releases any subscription it still holds.
pub struct Viewport<S: EventSurface> {
    controller: ViewportController,
    state: ViewportState,
    surface: S,
    listeners: Option<Subscription>,
}

impl<S: EventSurface> Viewport<S> {
    pub fn new(surface: S, config: ViewportConfig) -> Self {
        Self {
            controller: ViewportController::new(config),
            state: ViewportState::default(),
            surface,
            listeners: None,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn transform(&self) -> TransformDescriptor {
        self.state.transform.descriptor()
    }

    pub fn cursor(&self) -> CursorHint {
        self.state.cursor(self.controller.config().min_scale)
    }

    pub fn has_listeners(&self) -> bool {
        self.listeners.is_some()
    }

    /// Run one event through the reducer, then attach or detach global
    /// listeners to match whether a gesture is still active.
    pub fn dispatch(&mut self, event: ViewportEvent) -> &ViewportState {
        self.state = self.controller.apply(&self.state, &event);
        self.sync_listeners();
        &self.state
    }

    fn sync_listeners(&mut self) {
        match (self.state.gesture.is_active(), self.listeners.is_some()) {
            (true, false) => self.listeners = Some(self.surface.subscribe(DRAG_LISTENERS)),
            (false, true) => {
                if let Some(sub) = self.listeners.take() {
                    sub.release();
                }
            }
            _ => {}
        }
    }
}
