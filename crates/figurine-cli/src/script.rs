//! Gesture scripts replayed by the `crop` and `view` commands.
//!
//! A script is a TOML document with an ordered list of `[[step]]` tables,
//! each tagged by `action`:
//!
//! ```toml
//! aspect = "16:9"
//!
//! [[step]]
//! action = "press"
//! at = [410.0, 300.0]
//!
//! [[step]]
//! action = "move"
//! to = [450.0, 320.0]
//!
//! [[step]]
//! action = "release"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use figurine_core::crop::{CropEvent, CropHandle};
use figurine_core::geometry::{Point, Size};
use figurine_core::viewport::ViewportEvent;

pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse script {}", path.display()))
}

fn point([x, y]: [f32; 2]) -> Point {
    Point::new(x, y)
}

fn contacts(c: &[[f32; 2]]) -> Vec<Point> {
    c.iter().copied().map(point).collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct CropScript {
    /// Aspect ratio used when the command line does not give one.
    #[serde(default)]
    pub aspect: Option<String>,
    #[serde(default, rename = "step")]
    pub steps: Vec<CropStep>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CropStep {
    /// Press at `at`. Without `handle` the handle under the pointer is used.
    Press {
        at: [f32; 2],
        #[serde(default)]
        handle: Option<CropHandle>,
    },
    Move { to: [f32; 2] },
    Release,
    Resize { width: f32, height: f32 },
}

impl CropStep {
    /// The reducer event for this step. `Press` needs the resolved handle,
    /// so it is handled by the caller.
    pub fn to_event(&self) -> Option<CropEvent> {
        match *self {
            CropStep::Press { .. } => None,
            CropStep::Move { to } => Some(CropEvent::PointerMove(point(to))),
            CropStep::Release => Some(CropEvent::EndHandleDrag),
            CropStep::Resize { width, height } => {
                Some(CropEvent::ContainerResized(Size::new(width, height)))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ViewScript {
    /// Identity of the bound image; any non-empty name works.
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default, rename = "step")]
    pub steps: Vec<ViewStep>,
}

fn default_image() -> String {
    "script".into()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewStep {
    Wheel { delta_y: f32 },
    ZoomIn,
    ZoomOut,
    RotateCw,
    RotateCcw,
    Reset,
    Load { image: String },
    DragStart { at: [f32; 2] },
    DragMove { to: [f32; 2] },
    DragEnd,
    TouchStart { contacts: Vec<[f32; 2]> },
    TouchMove { contacts: Vec<[f32; 2]> },
    TouchEnd {
        #[serde(default)]
        contacts: Vec<[f32; 2]>,
    },
}

impl ViewStep {
    pub fn to_event(&self) -> ViewportEvent {
        match self {
            ViewStep::Wheel { delta_y } => ViewportEvent::Wheel { delta_y: *delta_y },
            ViewStep::ZoomIn => ViewportEvent::ZoomIn,
            ViewStep::ZoomOut => ViewportEvent::ZoomOut,
            ViewStep::RotateCw => ViewportEvent::RotateClockwise,
            ViewStep::RotateCcw => ViewportEvent::RotateCounterClockwise,
            ViewStep::Reset => ViewportEvent::Reset,
            ViewStep::Load { image } => ViewportEvent::BindImage(Some(image.clone())),
            ViewStep::DragStart { at } => ViewportEvent::DragStart(point(*at)),
            ViewStep::DragMove { to } => ViewportEvent::DragMove(point(*to)),
            ViewStep::DragEnd => ViewportEvent::DragEnd,
            ViewStep::TouchStart { contacts: c } => ViewportEvent::TouchStart(contacts(c)),
            ViewStep::TouchMove { contacts: c } => ViewportEvent::TouchMove(contacts(c)),
            ViewStep::TouchEnd { contacts: c } => ViewportEvent::TouchEnd(contacts(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_crop_script() {
        let script: CropScript = toml::from_str(
            r#"
            aspect = "4:3"

            [[step]]
            action = "press"
            at = [10.0, 20.0]
            handle = "se"

            [[step]]
            action = "move"
            to = [30.0, 40.0]

            [[step]]
            action = "release"
            "#,
        )
        .unwrap();
        assert_eq!(script.aspect.as_deref(), Some("4:3"));
        assert_eq!(
            script.steps[0],
            CropStep::Press {
                at: [10.0, 20.0],
                handle: Some(CropHandle::Se)
            }
        );
        assert_eq!(
            script.steps[1].to_event(),
            Some(CropEvent::PointerMove(Point::new(30.0, 40.0)))
        );
        assert_eq!(script.steps[2].to_event(), Some(CropEvent::EndHandleDrag));
    }

    #[test]
    fn parses_view_script_with_default_image() {
        let script: ViewScript = toml::from_str(
            r#"
            [[step]]
            action = "zoom_in"

            [[step]]
            action = "touch_start"
            contacts = [[0.0, 0.0], [100.0, 0.0]]

            [[step]]
            action = "touch_end"
            "#,
        )
        .unwrap();
        assert_eq!(script.image, "script");
        assert_eq!(script.steps[0].to_event(), ViewportEvent::ZoomIn);
        assert_eq!(
            script.steps[1].to_event(),
            ViewportEvent::TouchStart(vec![Point::ZERO, Point::new(100.0, 0.0)])
        );
        assert_eq!(script.steps[2].to_event(), ViewportEvent::TouchEnd(vec![]));
    }

    #[test]
    fn rejects_unknown_action() {
        let parsed: std::result::Result<ViewScript, _> =
            toml::from_str("[[step]]\naction = \"spin\"\n");
        assert!(parsed.is_err());
    }
}
