//! Pan/zoom/rotate preview viewport.

pub mod controller;
pub mod gesture;
pub mod instance;
pub mod transform;

pub use controller::{CursorHint, ImageId, ViewportController, ViewportEvent, ViewportState};
pub use gesture::GestureSession;
pub use instance::Viewport;
pub use transform::{wrap_rotation, TransformDescriptor, ViewportTransform};
