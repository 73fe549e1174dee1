use std::fmt;
use std::path::PathBuf;

use figurine_core::config::ExportFormat;

/// Which interaction the central panel is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    View,
    Crop,
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View => write!(f, "View"),
            Self::Crop => write!(f, "Crop"),
        }
    }
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,
    pub mode: EditorMode,
    pub export_format: ExportFormat,
    /// A save dialog or write is in flight.
    pub is_saving: bool,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
