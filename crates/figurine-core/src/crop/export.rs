use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::config::ExportFormat;
use crate::error::{EditorError, Result};

use super::controller::CropState;
use super::fitted::FittedImageBox;
use super::rect::CropRect;

/// A rectangle in natural (source) image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRegion {
    /// Map a display-space crop into source pixels: subtract the fitted
    /// origin, then scale by natural/fitted per axis. Rounds to whole
    /// pixels and trims any rounding overshoot at the source edges.
    pub fn from_display(
        rect: &CropRect,
        fitted: &FittedImageBox,
        natural_width: u32,
        natural_height: u32,
    ) -> PixelRegion {
        let scale_x = natural_width as f32 / fitted.width;
        let scale_y = natural_height as f32 / fitted.height;

        let x = ((rect.x - fitted.left) * scale_x).round().max(0.0) as u32;
        let y = ((rect.y - fitted.top) * scale_y).round().max(0.0) as u32;
        let width = (rect.width * scale_x).round().max(0.0) as u32;
        let height = (rect.height * scale_y).round().max(0.0) as u32;

        PixelRegion {
            x,
            y,
            width: width.min(natural_width.saturating_sub(x)),
            height: height.min(natural_height.saturating_sub(y)),
        }
    }

    /// Check the region is non-empty and inside a `src_w`x`src_h` source.
    pub fn validated(&self, src_w: u32, src_h: u32) -> Result<PixelRegion> {
        if self.width == 0 || self.height == 0 {
            return Err(EditorError::InvalidRegion(
                "Region width and height must be > 0".into(),
            ));
        }

        if self.x + self.width > src_w || self.y + self.height > src_h {
            return Err(EditorError::InvalidRegion(format!(
                "Region ({},{} {}x{}) exceeds source dimensions ({src_w}x{src_h})",
                self.x, self.y, self.width, self.height
            )));
        }

        Ok(*self)
    }
}

/// A source the cropper can copy pixels from.
pub trait ImageSource {
    /// Natural pixel dimensions, or `None` while the image is not ready.
    fn natural_size(&self) -> Option<(u32, u32)>;

    /// Copy `region` into a new raster of exactly the region's size.
    fn copy_region(&self, region: &PixelRegion) -> Result<DynamicImage>;
}

impl ImageSource for DynamicImage {
    fn natural_size(&self) -> Option<(u32, u32)> {
        let (w, h) = self.dimensions();
        (w > 0 && h > 0).then_some((w, h))
    }

    fn copy_region(&self, region: &PixelRegion) -> Result<DynamicImage> {
        let (w, h) = self.dimensions();
        let region = region.validated(w, h)?;
        Ok(self.crop_imm(region.x, region.y, region.width, region.height))
    }
}

impl<T: ImageSource> ImageSource for Option<T> {
    fn natural_size(&self) -> Option<(u32, u32)> {
        self.as_ref().and_then(T::natural_size)
    }

    fn copy_region(&self, region: &PixelRegion) -> Result<DynamicImage> {
        self.as_ref()
            .ok_or(EditorError::ImageNotReady)?
            .copy_region(region)
    }
}

/// An exported crop, encoded and ready to be saved or re-loaded.
#[derive(Clone, Debug)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    pub fn encode(raster: &DynamicImage, format: ExportFormat) -> Result<Self> {
        let mut bytes = Vec::new();
        match format {
            // JPEG has no alpha channel.
            ExportFormat::Jpeg => DynamicImage::ImageRgb8(raster.to_rgb8())
                .write_to(&mut Cursor::new(&mut bytes), format.image_format())?,
            ExportFormat::Png => {
                raster.write_to(&mut Cursor::new(&mut bytes), format.image_format())?
            }
        }
        Ok(Self {
            bytes,
            format,
            width: raster.width(),
            height: raster.height(),
        })
    }

    /// Load the encoded bytes back into a raster.
    pub fn decode(&self) -> Result<DynamicImage> {
        Ok(image::load_from_memory_with_format(
            &self.bytes,
            self.format.image_format(),
        )?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Export the committed crop rect of `state` from `source` at natural
/// resolution.
pub fn export_selection<I: ImageSource + ?Sized>(
    state: &CropState,
    source: &I,
    format: ExportFormat,
) -> Result<EncodedImage> {
    let (Some(rect), Some(fitted)) = (state.rect, state.fitted) else {
        return Err(EditorError::ImageNotReady);
    };
    let (natural_w, natural_h) = source.natural_size().ok_or(EditorError::ImageNotReady)?;

    let region = PixelRegion::from_display(&rect, &fitted, natural_w, natural_h)
        .validated(natural_w, natural_h)?;
    debug!(?rect, ?region, "exporting crop");

    let raster = source.copy_region(&region)?;
    EncodedImage::encode(&raster, format)
}
