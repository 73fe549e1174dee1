use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;
use crate::geometry::Point;

use super::fitted::FittedImageBox;

/// Crop selection in display pixels, relative to the container's top-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True when the rect lies inside `fitted`, allowing float slack.
    pub fn is_within(&self, fitted: &FittedImageBox) -> bool {
        self.x >= fitted.left - EPSILON
            && self.y >= fitted.top - EPSILON
            && self.right() <= fitted.right() + EPSILON
            && self.bottom() <= fitted.bottom() + EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Default crop for a freshly fitted image: aspect-locked, covering
/// `fraction` of the limiting fitted dimension, centered in the fitted box.
pub fn init_crop(fitted: &FittedImageBox, aspect_ratio: f32, fraction: f32) -> CropRect {
    let (width, height) = if aspect_ratio > fitted.aspect() {
        let width = fitted.width * fraction;
        (width, width / aspect_ratio)
    } else {
        let height = fitted.height * fraction;
        (height * aspect_ratio, height)
    };

    CropRect {
        x: fitted.left + (fitted.width - width) / 2.0,
        y: fitted.top + (fitted.height - height) / 2.0,
        width,
        height,
    }
}

/// Enlarge a default crop that came out below `min_size` on either side,
/// keeping its aspect and center. When the fitted box cannot hold a rect
/// that large, the largest aspect-locked rect that fits is used instead.
pub fn grow_to_min_size(
    rect: &CropRect,
    fitted: &FittedImageBox,
    aspect_ratio: f32,
    min_size: f32,
) -> CropRect {
    if rect.width >= min_size && rect.height >= min_size {
        return *rect;
    }
    let (width, height) = if aspect_ratio >= 1.0 {
        (min_size * aspect_ratio, min_size)
    } else {
        (min_size, min_size / aspect_ratio)
    };
    if width > fitted.width || height > fitted.height {
        return init_crop(fitted, aspect_ratio, 1.0);
    }
    CropRect {
        x: fitted.left + (fitted.width - width) / 2.0,
        y: fitted.top + (fitted.height - height) / 2.0,
        width,
        height,
    }
}
