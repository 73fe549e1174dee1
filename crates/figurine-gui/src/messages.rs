use std::path::PathBuf;

use figurine_core::config::EditorConfig;
use figurine_core::crop::EncodedImage;
use image::DynamicImage;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode an image file for viewing and cropping.
    LoadImage { path: PathBuf },

    /// Write an already-encoded crop to disk.
    SaveCrop { path: PathBuf, encoded: EncodedImage },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    /// Decoding has begun; input stays disabled until it finishes.
    LoadStarted { path: PathBuf },

    ImageLoaded { path: PathBuf, image: DynamicImage },

    CropSaved { path: PathBuf, width: u32, height: u32 },

    /// The save dialog was dismissed.
    SaveCancelled,

    ConfigImported { config: EditorConfig },

    Error { message: String },

    Log { message: String },
}
