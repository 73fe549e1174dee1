use tracing::{debug, trace};

use crate::config::ViewportConfig;
use crate::consts::{EPSILON, MIN_PINCH_DISTANCE};
use crate::geometry::Point;

use super::gesture::{pinch_distance, single_contact, GestureSession};
use super::transform::ViewportTransform;

/// Identity of the image bound to a viewport (URL, path, or handle id).
pub type ImageId = String;

/// Everything the viewport reducer reads and writes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewportState {
    pub transform: ViewportTransform,
    pub gesture: GestureSession,
    /// Cursor feedback only; never gates input.
    pub dragging: bool,
    pub image: Option<ImageId>,
    pub loading: bool,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when input should be processed at all.
    pub fn accepts_input(&self) -> bool {
        self.image.is_some() && !self.loading
    }

    pub fn cursor(&self, min_scale: f32) -> CursorHint {
        if self.dragging {
            CursorHint::Grabbing
        } else if self.transform.scale > min_scale {
            CursorHint::Grab
        } else {
            CursorHint::Default
        }
    }
}

/// Pointer cursor a host should display over the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Grab,
    Grabbing,
}

/// Discrete inputs the viewport reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewportEvent {
    /// Bind a new image source (or unbind with `None`).
    BindImage(Option<ImageId>),
    SetLoading(bool),
    Reset,
    Wheel { delta_y: f32 },
    ZoomIn,
    ZoomOut,
    RotateClockwise,
    RotateCounterClockwise,
    DragStart(Point),
    DragMove(Point),
    DragEnd,
    /// Contacts currently on the surface after a touch was added.
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    /// Contacts still on the surface after a touch was lifted.
    TouchEnd(Vec<Point>),
}

/// Pure state-transition functions for a viewport.
///
/// Every method takes the current state and returns the next one; nothing
/// here holds state of its own besides the configured bounds.
#[derive(Clone, Debug, Default)]
pub struct ViewportController {
    config: ViewportConfig,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn apply(&self, state: &ViewportState, event: &ViewportEvent) -> ViewportState {
        match event {
            ViewportEvent::BindImage(image) => self.bind_image(state, image.clone()),
            ViewportEvent::SetLoading(loading) => ViewportState {
                loading: *loading,
                ..state.clone()
            },
            ViewportEvent::Reset => self.reset(state),
            ViewportEvent::Wheel { delta_y } => self.on_wheel(state, *delta_y),
            ViewportEvent::ZoomIn => self.zoom_in(state),
            ViewportEvent::ZoomOut => self.zoom_out(state),
            ViewportEvent::RotateClockwise => self.rotate_clockwise(state),
            ViewportEvent::RotateCounterClockwise => self.rotate_counter_clockwise(state),
            ViewportEvent::DragStart(p) => self.drag_start(state, *p),
            ViewportEvent::DragMove(p) => self.drag_move(state, *p),
            ViewportEvent::DragEnd => self.drag_end(state),
            ViewportEvent::TouchStart(contacts) => self.touch_start(state, contacts),
            ViewportEvent::TouchMove(contacts) => self.touch_move(state, contacts),
            ViewportEvent::TouchEnd(contacts) => self.touch_end(state, contacts),
        }
    }

    /// Identity transform, no gesture.
    pub fn reset(&self, state: &ViewportState) -> ViewportState {
        ViewportState {
            transform: ViewportTransform {
                scale: self.config.min_scale,
                ..ViewportTransform::IDENTITY
            },
            gesture: GestureSession::None,
            dragging: false,
            ..state.clone()
        }
    }

    /// Binding a different source resets the transform; rebinding the same
    /// source keeps it.
    pub fn bind_image(&self, state: &ViewportState, image: Option<ImageId>) -> ViewportState {
        if state.image == image {
            return state.clone();
        }
        debug!(image = ?image, "viewport image changed, resetting transform");
        let mut next = self.reset(state);
        next.image = image;
        next
    }

    pub fn on_wheel(&self, state: &ViewportState, delta_y: f32) -> ViewportState {
        if !state.accepts_input() {
            return state.clone();
        }
        let delta = if delta_y > 0.0 {
            -self.config.zoom_step
        } else {
            self.config.zoom_step
        };
        self.set_scale_or_snap(state, state.transform.scale + delta)
    }

    pub fn zoom_in(&self, state: &ViewportState) -> ViewportState {
        if !state.accepts_input() {
            return state.clone();
        }
        self.set_scale_or_snap(state, state.transform.scale + self.config.zoom_step)
    }

    pub fn zoom_out(&self, state: &ViewportState) -> ViewportState {
        if !state.accepts_input() {
            return state.clone();
        }
        self.set_scale_or_snap(state, state.transform.scale - self.config.zoom_step)
    }

    pub fn rotate_clockwise(&self, state: &ViewportState) -> ViewportState {
        if !state.accepts_input() {
            return state.clone();
        }
        ViewportState {
            transform: state.transform.rotated(1),
            ..state.clone()
        }
    }

    pub fn rotate_counter_clockwise(&self, state: &ViewportState) -> ViewportState {
        if !state.accepts_input() {
            return state.clone();
        }
        ViewportState {
            transform: state.transform.rotated(-1),
            ..state.clone()
        }
    }

    /// Begin panning. Ignored at the minimum scale.
    pub fn drag_start(&self, state: &ViewportState, pointer: Point) -> ViewportState {
        if !state.accepts_input() || !self.is_zoomed(state) {
            return state.clone();
        }
        ViewportState {
            gesture: GestureSession::SingleDrag {
                start_pointer: pointer,
                start_translation: state.transform.translation,
            },
            dragging: true,
            ..state.clone()
        }
    }

    pub fn drag_move(&self, state: &ViewportState, pointer: Point) -> ViewportState {
        if !state.accepts_input() {
            return state.clone();
        }
        let GestureSession::SingleDrag {
            start_pointer,
            start_translation,
        } = state.gesture
        else {
            return state.clone();
        };
        let delta = pointer.delta_from(start_pointer);
        let translation = start_translation.offset(delta.x, delta.y);
        trace!(x = translation.x, y = translation.y, "viewport pan");
        ViewportState {
            transform: ViewportTransform {
                translation,
                ..state.transform
            },
            ..state.clone()
        }
    }

    pub fn drag_end(&self, state: &ViewportState) -> ViewportState {
        ViewportState {
            gesture: GestureSession::None,
            dragging: false,
            ..state.clone()
        }
    }

    pub fn touch_start(&self, state: &ViewportState, contacts: &[Point]) -> ViewportState {
        if !state.accepts_input() {
            return state.clone();
        }
        if let Some(distance) = pinch_distance(contacts) {
            return self.begin_pinch(state, distance);
        }
        match single_contact(contacts) {
            Some(p) => self.drag_start(state, p),
            None => state.clone(),
        }
    }

    pub fn touch_move(&self, state: &ViewportState, contacts: &[Point]) -> ViewportState {
        if !state.accepts_input() {
            return state.clone();
        }
        match (state.gesture, contacts) {
            (
                GestureSession::PinchZoom {
                    start_distance,
                    start_scale,
                },
                [a, b],
            ) => {
                let scale_change = a.distance_to(*b) / start_distance;
                self.set_scale_or_snap(state, start_scale * scale_change)
            }
            (GestureSession::SingleDrag { .. }, [p]) => self.drag_move(state, *p),
            _ => state.clone(),
        }
    }

    /// Handle a lifted contact. Going from a pinch to one contact hands
    /// over to a drag anchored at the current translation; dropping back to
    /// two contacts re-measures the pinch baseline at the current scale.
    pub fn touch_end(&self, state: &ViewportState, remaining: &[Point]) -> ViewportState {
        if state.gesture.is_pinch() {
            if let Some(p) = single_contact(remaining) {
                debug!("pinch ended with one contact left, continuing as drag");
                let ended = self.drag_end(state);
                return self.drag_start(&ended, p);
            }
            if let Some(distance) = pinch_distance(remaining) {
                let ended = self.drag_end(state);
                return self.begin_pinch(&ended, distance);
            }
        }
        if remaining.is_empty() || !state.gesture.is_active() {
            return self.drag_end(state);
        }
        state.clone()
    }

    fn begin_pinch(&self, state: &ViewportState, distance: f32) -> ViewportState {
        if distance < MIN_PINCH_DISTANCE {
            return state.clone();
        }
        debug!(distance, scale = state.transform.scale, "pinch start");
        ViewportState {
            gesture: GestureSession::PinchZoom {
                start_distance: distance,
                start_scale: state.transform.scale,
            },
            dragging: false,
            ..state.clone()
        }
    }

    fn is_zoomed(&self, state: &ViewportState) -> bool {
        state.transform.scale > self.config.min_scale + EPSILON
    }

    /// Clamp `scale` into bounds; landing on the minimum snaps back to the
    /// identity transform.
    fn set_scale_or_snap(&self, state: &ViewportState, scale: f32) -> ViewportState {
        let clamped = scale.clamp(self.config.min_scale, self.config.max_scale);
        if clamped <= self.config.min_scale {
            debug!("scale reached minimum, snapping back to center");
            return self.reset(state);
        }
        ViewportState {
            transform: ViewportTransform {
                scale: clamped,
                ..state.transform
            },
            ..state.clone()
        }
    }
}
