//! Aspect-locked crop rectangle and selection export.

pub mod aspect;
pub mod controller;
pub mod export;
pub mod fitted;
pub mod handle;
pub mod instance;
pub mod rect;

pub use aspect::AspectPreset;
pub use controller::{CropController, CropEvent, CropState, HandleDrag};
pub use export::{export_selection, EncodedImage, ImageSource, PixelRegion};
pub use fitted::{compute_fitted_box, FittedImageBox};
pub use handle::{CropHandle, HandleCursor};
pub use instance::Cropper;
pub use rect::{grow_to_min_size, init_crop, CropRect};
