use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{FULL_ROTATION, MIN_SCALE, ROTATION_STEP};
use crate::geometry::Point;

/// Pan/zoom/rotate state of a viewport.
///
/// `scale` is kept in `[min_scale, max_scale]` by the controller and
/// `rotation` is one of 0, 90, 180, 270. At the minimum scale the
/// translation is always zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub scale: f32,
    pub translation: Point,
    pub rotation: i32,
}

impl ViewportTransform {
    pub const IDENTITY: ViewportTransform = ViewportTransform {
        scale: MIN_SCALE,
        translation: Point::ZERO,
        rotation: 0,
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Rotation after `steps` quarter turns (negative = counter-clockwise).
    pub fn rotated(&self, steps: i32) -> Self {
        Self {
            rotation: wrap_rotation(self.rotation + steps * ROTATION_STEP),
            ..*self
        }
    }

    pub fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            translate: self.translation,
            scale: self.scale,
            rotate: self.rotation,
        }
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Wrap any degree value into `[0, 360)`.
pub fn wrap_rotation(degrees: i32) -> i32 {
    degrees.rem_euclid(FULL_ROTATION)
}

/// Composite 2D transform handed to a rendering surface: translate, then
/// scale, then rotate, in CSS transform-list order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformDescriptor {
    pub translate: Point,
    pub scale: f32,
    pub rotate: i32,
}

impl TransformDescriptor {
    /// CSS `transform` property value.
    pub fn to_css(&self) -> String {
        self.to_string()
    }

    /// Affine matrix `[a, b, c, d, e, f]` in CSS `matrix()` convention:
    /// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
    pub fn to_matrix(&self) -> [f32; 6] {
        let (sin, cos) = quarter_turn_sin_cos(self.rotate);
        let s = self.scale;
        [
            s * cos,
            s * sin,
            -s * sin,
            s * cos,
            self.translate.x,
            self.translate.y,
        ]
    }

    /// Map a point given relative to the transform origin.
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.to_matrix();
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }
}

impl fmt::Display for TransformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({}) rotate({}deg)",
            self.translate.x, self.translate.y, self.scale, self.rotate
        )
    }
}

/// Exact sine/cosine for multiples of 90 degrees; falls back to trig otherwise.
fn quarter_turn_sin_cos(degrees: i32) -> (f32, f32) {
    match wrap_rotation(degrees) {
        0 => (0.0, 1.0),
        90 => (1.0, 0.0),
        180 => (0.0, -1.0),
        270 => (-1.0, 0.0),
        other => (other as f32).to_radians().sin_cos(),
    }
}
