use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

use super::rect::CropRect;

/// Drag handles of the crop rectangle: four edges, four corners, and the
/// interior for moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
    Move,
}

impl CropHandle {
    pub const ALL: &[Self] = &[
        Self::N,
        Self::S,
        Self::E,
        Self::W,
        Self::Ne,
        Self::Nw,
        Self::Se,
        Self::Sw,
        Self::Move,
    ];

    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Handles on the top or bottom edge, whose width follows the height.
    pub fn is_vertical_edge(self) -> bool {
        matches!(self, Self::N | Self::S)
    }

    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Nw | Self::Se | Self::Sw)
    }

    /// Anchor point of this handle on `rect`. `Move` anchors at the center.
    pub fn position(self, rect: &CropRect) -> Point {
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        match self {
            Self::N => Point::new(cx, rect.y),
            Self::S => Point::new(cx, rect.bottom()),
            Self::E => Point::new(rect.right(), cy),
            Self::W => Point::new(rect.x, cy),
            Self::Ne => Point::new(rect.right(), rect.y),
            Self::Nw => Point::new(rect.x, rect.y),
            Self::Se => Point::new(rect.right(), rect.bottom()),
            Self::Sw => Point::new(rect.x, rect.bottom()),
            Self::Move => Point::new(cx, cy),
        }
    }

    /// Resolve a pointer to a handle. Corners win over edges, edges over the
    /// interior; `None` when the pointer is outside the rect and all handles.
    pub fn hit_test(rect: &CropRect, pointer: Point, tolerance: f32) -> Option<CropHandle> {
        let near = |handle: CropHandle| {
            let anchor = handle.position(rect);
            (pointer.x - anchor.x).abs() <= tolerance && (pointer.y - anchor.y).abs() <= tolerance
        };

        const CORNERS: [CropHandle; 4] = [CropHandle::Nw, CropHandle::Ne, CropHandle::Sw, CropHandle::Se];
        const EDGES: [CropHandle; 4] = [CropHandle::N, CropHandle::S, CropHandle::W, CropHandle::E];

        CORNERS
            .into_iter()
            .chain(EDGES)
            .find(|&h| near(h))
            .or_else(|| rect.contains(pointer).then_some(CropHandle::Move))
    }

    pub fn cursor(self) -> HandleCursor {
        match self {
            Self::N | Self::S => HandleCursor::ResizeVertical,
            Self::E | Self::W => HandleCursor::ResizeHorizontal,
            Self::Nw | Self::Se => HandleCursor::ResizeNwSe,
            Self::Ne | Self::Sw => HandleCursor::ResizeNeSw,
            Self::Move => HandleCursor::Move,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
            Self::Move => "move",
        }
    }
}

impl fmt::Display for CropHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        CropHandle::ALL
            .iter()
            .copied()
            .find(|h| h.as_str() == lower)
            .ok_or_else(|| format!("unknown crop handle '{s}'"))
    }
}

/// Cursor a host should show while hovering or dragging a handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleCursor {
    Move,
    ResizeVertical,
    ResizeHorizontal,
    ResizeNwSe,
    ResizeNeSw,
}
