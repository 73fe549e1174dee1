use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use figurine_core::config::ExportFormat;
use figurine_core::consts::HANDLE_HIT_TOLERANCE;
use figurine_core::crop::{
    AspectPreset, CropEvent, CropHandle, Cropper, ImageSource, PixelRegion,
};
use figurine_core::geometry::{Point, Size};
use figurine_core::surface::PolledSurface;
use tracing::{info, warn};

use super::{crop_output_path, load_config, parse_aspect, parse_size};
use crate::script::{self, CropScript, CropStep};
use crate::summary::{print_crop, CropReport};

#[derive(Args)]
pub struct CropArgs {
    /// Input image
    pub file: PathBuf,

    /// Gesture script (TOML with [[step]] tables)
    #[arg(short, long)]
    pub script: PathBuf,

    /// Container size as WxH (defaults to the image's natural size)
    #[arg(long, value_parser = parse_size)]
    pub container: Option<Size>,

    /// Crop aspect: preset name, W:H, or ratio (overrides the script)
    #[arg(long, value_parser = parse_aspect)]
    pub aspect: Option<AspectPreset>,

    /// Output image (auto-generated if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Editor config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Replay a crop gesture script and export the committed selection.
pub fn run(args: &CropArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let script: CropScript = script::load(&args.script)?;

    let aspect = match (args.aspect, script.aspect.as_deref()) {
        (Some(aspect), _) => aspect,
        (None, Some(s)) => parse_aspect(s).map_err(anyhow::Error::msg)?,
        (None, None) => AspectPreset::default(),
    };

    let source = image::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let Some((natural_w, natural_h)) = source.natural_size() else {
        bail!("{} has no pixels", args.file.display());
    };
    let natural = Size::from((natural_w, natural_h));
    let container = args.container.unwrap_or(natural);

    let mut cropper = Cropper::new(PolledSurface, config.crop.clone(), aspect.ratio());
    cropper.dispatch(CropEvent::ContainerResized(container));
    cropper.dispatch(CropEvent::ImageLoaded { natural });

    for (i, step) in script.steps.iter().enumerate() {
        let event = match *step {
            CropStep::Press { at, handle } => {
                let pointer = Point::new(at[0], at[1]);
                let handle = handle.or_else(|| {
                    cropper
                        .rect()
                        .and_then(|r| CropHandle::hit_test(&r, pointer, HANDLE_HIT_TOLERANCE))
                });
                match handle {
                    Some(handle) => CropEvent::BeginHandleDrag { handle, pointer },
                    None => {
                        warn!(step = i, x = at[0], y = at[1], "press outside the crop, skipped");
                        continue;
                    }
                }
            }
            _ => match step.to_event() {
                Some(event) => event,
                None => continue,
            },
        };
        cropper.dispatch(event);
    }
    if cropper.is_listening_for_drag() {
        cropper.dispatch(CropEvent::EndHandleDrag);
    }

    let (Some(rect), Some(fitted)) = (cropper.rect(), cropper.state().fitted) else {
        bail!("image cannot be fitted into a {}x{} container", container.width, container.height);
    };
    let region = PixelRegion::from_display(&rect, &fitted, natural_w, natural_h);

    let format = args
        .output
        .as_deref()
        .and_then(format_from_extension)
        .unwrap_or(config.export.format);
    let encoded = cropper.export(&source, format)?;

    let output = args.output.clone().unwrap_or_else(|| {
        crop_output_path(&args.file, encoded.width, encoded.height, format.extension())
    });
    encoded
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(output = %output.display(), %format, "crop exported");

    print_crop(&CropReport {
        steps: script.steps.len(),
        rect: &rect,
        region,
        output: &output,
    });
    Ok(())
}

fn format_from_extension(path: &Path) -> Option<ExportFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some(ExportFormat::Png),
        "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
        _ => None,
    }
}
