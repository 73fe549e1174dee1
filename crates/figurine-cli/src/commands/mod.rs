pub mod config;
pub mod crop;
pub mod info;
pub mod view;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figurine_core::config::EditorConfig;
use figurine_core::crop::AspectPreset;
use figurine_core::geometry::Size;

/// Parse a `WxH` container size, e.g. `800x600`.
pub fn parse_size(s: &str) -> std::result::Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let width: f32 = w.trim().parse().map_err(|_| format!("bad width in '{s}'"))?;
    let height: f32 = h.trim().parse().map_err(|_| format!("bad height in '{s}'"))?;
    let size = Size::new(width, height);
    if !size.is_usable() {
        return Err(format!("container must be positive, got '{s}'"));
    }
    Ok(size)
}

pub fn parse_aspect(s: &str) -> std::result::Result<AspectPreset, String> {
    s.parse().map_err(|e: figurine_core::error::EditorError| e.to_string())
}

pub fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

/// `photo.jpg` -> `photo_crop400x400.png`, next to the source.
pub fn crop_output_path(source: &Path, w: u32, h: u32, ext: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let parent = source.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_crop{w}x{h}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_container_sizes() {
        assert_eq!(parse_size("800x600"), Ok(Size::new(800.0, 600.0)));
        assert_eq!(parse_size("640X480"), Ok(Size::new(640.0, 480.0)));
        assert!(parse_size("800").is_err());
        assert!(parse_size("0x600").is_err());
    }

    #[test]
    fn derives_output_path_from_source() {
        let path = crop_output_path(Path::new("/tmp/photo.jpg"), 400, 300, "png");
        assert_eq!(path, PathBuf::from("/tmp/photo_crop400x300.png"));
    }
}
