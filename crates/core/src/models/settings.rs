use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-configurable display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Prefix shown before money amounts in the rendered summary (e.g., "$").
    pub currency_symbol: String,

    /// Extension appended to save paths that have none (without the dot).
    pub file_extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            file_extension: "csv".to_string(),
        }
    }
}

impl Settings {
    /// `path` with [`Settings::file_extension`] appended when it has no
    /// extension of its own.
    #[must_use]
    pub fn with_default_extension(&self, path: &Path) -> PathBuf {
        if path.extension().is_some() || self.file_extension.is_empty() {
            path.to_path_buf()
        } else {
            path.with_extension(&self.file_extension)
        }
    }
}
