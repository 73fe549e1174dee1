use crate::geometry::Point;

/// The gesture currently driving a viewport, if any.
///
/// Only one kind can be active at a time; a pinch never carries drag state
/// and vice versa.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureSession {
    #[default]
    None,
    SingleDrag {
        start_pointer: Point,
        start_translation: Point,
    },
    PinchZoom {
        start_distance: f32,
        start_scale: f32,
    },
}

impl GestureSession {
    pub fn is_active(&self) -> bool {
        !matches!(self, GestureSession::None)
    }

    pub fn is_drag(&self) -> bool {
        matches!(self, GestureSession::SingleDrag { .. })
    }

    pub fn is_pinch(&self) -> bool {
        matches!(self, GestureSession::PinchZoom { .. })
    }
}

/// Distance between the first two contacts, or `None` unless exactly two
/// contacts are present.
pub fn pinch_distance(contacts: &[Point]) -> Option<f32> {
    match contacts {
        [a, b] => Some(a.distance_to(*b)),
        _ => None,
    }
}

/// The single active contact, or `None` unless exactly one is present.
pub fn single_contact(contacts: &[Point]) -> Option<Point> {
    match contacts {
        [p] => Some(*p),
        _ => None,
    }
}
