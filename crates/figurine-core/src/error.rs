use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("No image is bound or the image has not finished loading")]
    ImageNotReady,

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Invalid aspect ratio: {0}")]
    InvalidAspect(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
