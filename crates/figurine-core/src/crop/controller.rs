use tracing::{debug, trace};

use crate::config::CropConfig;
use crate::geometry::{Point, Size};

use super::aspect::{is_valid_ratio, AspectPreset};
use super::fitted::{compute_fitted_box, FittedImageBox};
use super::handle::CropHandle;
use super::rect::{grow_to_min_size, init_crop, CropRect};

/// An in-progress handle drag. Deltas are measured from `last_pointer`,
/// which advances on every move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleDrag {
    pub handle: CropHandle,
    pub last_pointer: Point,
}

/// Everything the crop reducer reads and writes.
#[derive(Clone, Debug, PartialEq)]
pub struct CropState {
    /// Target width/height of the crop frame.
    pub aspect_ratio: f32,
    pub container: Option<Size>,
    pub natural: Option<Size>,
    pub fitted: Option<FittedImageBox>,
    pub rect: Option<CropRect>,
    pub drag: Option<HandleDrag>,
}

impl CropState {
    /// A ratio that is zero, negative or non-finite falls back to the
    /// default preset.
    pub fn new(aspect_ratio: f32) -> Self {
        let aspect_ratio = if is_valid_ratio(aspect_ratio) {
            aspect_ratio
        } else {
            AspectPreset::default().ratio()
        };
        Self {
            aspect_ratio,
            container: None,
            natural: None,
            fitted: None,
            rect: None,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

/// Discrete inputs the cropper reacts to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CropEvent {
    /// A new image finished loading with these natural pixel dimensions.
    ImageLoaded { natural: Size },
    ContainerResized(Size),
    SetAspectRatio(f32),
    BeginHandleDrag { handle: CropHandle, pointer: Point },
    PointerMove(Point),
    EndHandleDrag,
    /// The image was unbound; drop all geometry.
    Unload,
}

/// Pure state-transition functions for the crop rectangle.
#[derive(Clone, Debug, Default)]
pub struct CropController {
    config: CropConfig,
}

impl CropController {
    pub fn new(config: CropConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn apply(&self, state: &CropState, event: &CropEvent) -> CropState {
        match *event {
            CropEvent::ImageLoaded { natural } => self.image_loaded(state, natural),
            CropEvent::ContainerResized(size) => self.container_resized(state, size),
            CropEvent::SetAspectRatio(ratio) => self.set_aspect_ratio(state, ratio),
            CropEvent::BeginHandleDrag { handle, pointer } => {
                self.begin_handle_drag(state, handle, pointer)
            }
            CropEvent::PointerMove(p) => self.on_pointer_move(state, p),
            CropEvent::EndHandleDrag => self.end_handle_drag(state),
            CropEvent::Unload => CropState::new(state.aspect_ratio),
        }
    }

    pub fn image_loaded(&self, state: &CropState, natural: Size) -> CropState {
        self.refit(CropState {
            natural: Some(natural),
            ..state.clone()
        })
    }

    pub fn container_resized(&self, state: &CropState, container: Size) -> CropState {
        self.refit(CropState {
            container: Some(container),
            ..state.clone()
        })
    }

    /// Change the target ratio and recompute the default crop.
    pub fn set_aspect_ratio(&self, state: &CropState, ratio: f32) -> CropState {
        if !is_valid_ratio(ratio) {
            return state.clone();
        }
        self.refit(CropState {
            aspect_ratio: ratio,
            ..state.clone()
        })
    }

    pub fn begin_handle_drag(
        &self,
        state: &CropState,
        handle: CropHandle,
        pointer: Point,
    ) -> CropState {
        if state.rect.is_none() {
            return state.clone();
        }
        trace!(%handle, "crop drag start");
        CropState {
            drag: Some(HandleDrag {
                handle,
                last_pointer: pointer,
            }),
            ..state.clone()
        }
    }

    pub fn on_pointer_move(&self, state: &CropState, pointer: Point) -> CropState {
        let (Some(drag), Some(rect), Some(fitted)) = (state.drag, state.rect, state.fitted) else {
            return state.clone();
        };

        let dx = pointer.x - drag.last_pointer.x;
        let dy = pointer.y - drag.last_pointer.y;

        let mut next = CropState {
            drag: Some(HandleDrag {
                last_pointer: pointer,
                ..drag
            }),
            ..state.clone()
        };

        match self.resize(&rect, drag.handle, dx, dy, &fitted, state.aspect_ratio) {
            Some(candidate) => next.rect = Some(candidate),
            None => debug!(handle = %drag.handle, dx, dy, "crop mutation rejected"),
        }
        next
    }

    pub fn end_handle_drag(&self, state: &CropState) -> CropState {
        CropState {
            drag: None,
            ..state.clone()
        }
    }

    /// Apply one incremental handle delta to `prev`, then re-lock the aspect
    /// ratio and clamp into `fitted`. `None` when the result would fall
    /// below the minimum size; callers keep `prev` in that case.
    pub fn resize(
        &self,
        prev: &CropRect,
        handle: CropHandle,
        dx: f32,
        dy: f32,
        fitted: &FittedImageBox,
        aspect_ratio: f32,
    ) -> Option<CropRect> {
        let mut r = *prev;

        if handle == CropHandle::Move {
            r.x += dx;
            r.y += dy;
        } else {
            if handle.moves_east() {
                r.width += dx;
            }
            if handle.moves_west() {
                r.width -= dx;
                r.x += dx;
            }
            if handle.moves_south() {
                r.height += dy;
            }
            if handle.moves_north() {
                r.height -= dy;
                r.y += dy;
            }

            if handle.is_vertical_edge() {
                r.width = r.height * aspect_ratio;
            } else {
                r.height = r.width / aspect_ratio;
            }

            // Keep the edges opposite the pointer fixed.
            match handle {
                CropHandle::Nw => {
                    r.x = prev.right() - r.width;
                    r.y = prev.bottom() - r.height;
                }
                CropHandle::Ne => r.y = prev.bottom() - r.height,
                CropHandle::Sw => r.x = prev.right() - r.width,
                _ => {}
            }
        }

        r.x = r.x.max(fitted.left);
        r.y = r.y.max(fitted.top);
        if r.right() > fitted.right() {
            r.width = fitted.right() - r.x;
            r.height = r.width / aspect_ratio;
        }
        if r.bottom() > fitted.bottom() {
            r.height = fitted.bottom() - r.y;
            r.width = r.height * aspect_ratio;
        }

        let min = self.config.min_size;
        if !r.is_finite() || r.width < min || r.height < min {
            return None;
        }
        Some(r)
    }

    /// Recompute the fitted box and the default crop from the current
    /// container and natural sizes.
    fn refit(&self, mut state: CropState) -> CropState {
        state.fitted = match (state.container, state.natural) {
            (Some(container), Some(natural)) => compute_fitted_box(container, natural),
            _ => None,
        };
        state.rect = state.fitted.map(|fitted| {
            let rect = init_crop(&fitted, state.aspect_ratio, self.config.initial_fraction);
            grow_to_min_size(&rect, &fitted, state.aspect_ratio, self.config.min_size)
        });
        if let (Some(fitted), Some(rect)) = (state.fitted, state.rect) {
            debug!(?fitted, ?rect, "crop refit");
        }
        state
    }
}
