use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CROP_FRACTION, MAX_SCALE, MIN_CROP_SIZE, MIN_SCALE, ZOOM_STEP};
use crate::error::{EditorError, Result};

/// Complete editor configuration, stored as TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub crop: CropConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl EditorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: EditorConfig =
            toml::from_str(s).map_err(|e| EditorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EditorError::Config(e.to_string()))
    }

    /// Reject bounds that would make the clamping rules meaningless.
    pub fn validate(&self) -> Result<()> {
        let v = &self.viewport;
        if !(v.min_scale > 0.0 && v.max_scale >= v.min_scale) {
            return Err(EditorError::Config(format!(
                "viewport scale bounds [{}, {}] are invalid",
                v.min_scale, v.max_scale
            )));
        }
        if v.zoom_step <= 0.0 {
            return Err(EditorError::Config(format!(
                "zoom_step must be > 0 (got {})",
                v.zoom_step
            )));
        }
        let c = &self.crop;
        if c.min_size < 0.0 {
            return Err(EditorError::Config(format!(
                "crop min_size must be >= 0 (got {})",
                c.min_size
            )));
        }
        if !(c.initial_fraction > 0.0 && c.initial_fraction <= 1.0) {
            return Err(EditorError::Config(format!(
                "crop initial_fraction must be in (0, 1] (got {})",
                c.initial_fraction
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,
    /// Scale change per zoom button press or wheel notch.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
}

fn default_min_scale() -> f32 {
    MIN_SCALE
}
fn default_max_scale() -> f32 {
    MAX_SCALE
}
fn default_zoom_step() -> f32 {
    ZOOM_STEP
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropConfig {
    /// Minimum crop width/height in display pixels.
    #[serde(default = "default_min_size")]
    pub min_size: f32,
    /// Fraction of the limiting fitted dimension used by the default crop.
    #[serde(default = "default_initial_fraction")]
    pub initial_fraction: f32,
}

fn default_min_size() -> f32 {
    MIN_CROP_SIZE
}
fn default_initial_fraction() -> f32 {
    DEFAULT_CROP_FRACTION
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_CROP_SIZE,
            initial_fraction: DEFAULT_CROP_FRACTION,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: ExportFormat,
}

/// Encoding used for exported crops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Jpeg => write!(f, "JPEG"),
        }
    }
}
