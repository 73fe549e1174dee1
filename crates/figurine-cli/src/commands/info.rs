use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use figurine_core::crop::{AspectPreset, CropController, CropEvent, CropState};
use figurine_core::geometry::Size;

use super::{parse_aspect, parse_size};
use crate::summary::{print_layout, LayoutReport};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image
    pub file: PathBuf,

    /// Container size as WxH (defaults to the image's natural size)
    #[arg(long, value_parser = parse_size)]
    pub container: Option<Size>,

    /// Crop aspect: preset name, W:H, or ratio
    #[arg(long, value_parser = parse_aspect, default_value = "square")]
    pub aspect: AspectPreset,
}

/// Show natural size, fitted box and default crop for an image.
pub fn run(args: &InfoArgs) -> Result<()> {
    let natural: Size = image::image_dimensions(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?
        .into();
    let container = args.container.unwrap_or(natural);

    let controller = CropController::default();
    let state = CropState::new(args.aspect.ratio());
    let state = controller.apply(&state, &CropEvent::ContainerResized(container));
    let state = controller.apply(&state, &CropEvent::ImageLoaded { natural });

    print_layout(&LayoutReport {
        file: &args.file,
        natural,
        container,
        aspect: args.aspect,
        fitted: state.fitted,
        rect: state.rect,
    });
    Ok(())
}
