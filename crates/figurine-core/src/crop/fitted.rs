use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// Letterboxed placement of an image inside its container, in container
/// pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedImageBox {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
}

impl FittedImageBox {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Fit `natural` inside `container` preserving aspect ratio, centering the
/// unfilled axis. Returns `None` for empty or non-finite sizes.
pub fn compute_fitted_box(container: Size, natural: Size) -> Option<FittedImageBox> {
    if !container.is_usable() || !natural.is_usable() {
        return None;
    }

    let image_aspect = natural.aspect();
    let container_aspect = container.aspect();

    let fitted = if image_aspect > container_aspect {
        // Wider than the container: span the full width.
        let height = container.width / image_aspect;
        FittedImageBox {
            width: container.width,
            height,
            left: 0.0,
            top: (container.height - height) / 2.0,
        }
    } else {
        let width = container.height * image_aspect;
        FittedImageBox {
            width,
            height: container.height,
            left: (container.width - width) / 2.0,
            top: 0.0,
        }
    };

    Some(fitted)
}
