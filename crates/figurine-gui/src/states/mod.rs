mod crop;
mod preview;
mod ui;

pub use crop::CropPanelState;
pub use preview::PreviewState;
pub use ui::{EditorMode, UIState};
