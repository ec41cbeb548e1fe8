//! Preset persistence capabilities.
//!
//! The codec never talks to a platform file API directly: saving goes
//! through a [`PresetSink`] and loading through a [`PresetPicker`], so the
//! same save/load logic serves a native file dialog, a plain directory, or
//! a test double. A picker returning `Ok(None)` means the user cancelled;
//! callers must treat that as a true no-op.

use std::path::{Path, PathBuf};

use crate::error::{PresetError, Result};

/// Write a preset document somewhere durable.
pub trait PresetSink {
    /// Persist `contents` under a suggested file name. Returns the path
    /// written, or `None` when the user cancelled.
    fn save(&self, suggested_name: &str, contents: &str) -> Result<Option<PathBuf>>;
}

/// Fetch a preset document chosen by the user.
pub trait PresetPicker {
    /// Returns the file contents, or `None` when the user cancelled.
    fn pick(&self, suggested_name: &str) -> Result<Option<String>>;
}

/// Filesystem-backed store for headless use and tests: saves into a fixed
/// directory, picks by the suggested name.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl PresetSink for DirStore {
    fn save(&self, suggested_name: &str, contents: &str) -> Result<Option<PathBuf>> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| PresetError::WriteFile(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.dir.join(suggested_name);
        std::fs::write(&path, contents)
            .map_err(|e| PresetError::WriteFile(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Saved preset: {}", path.display());
        Ok(Some(path))
    }
}

impl PresetPicker for DirStore {
    fn pick(&self, suggested_name: &str) -> Result<Option<String>> {
        let path = self.dir.join(suggested_name);
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| PresetError::ReadFile(format!("{}: {}", path.display(), e)))?;
        Ok(Some(contents))
    }
}

/// Native save/open dialogs via `rfd`. Dismissing the dialog yields
/// `Ok(None)`.
#[cfg(feature = "native-ui")]
#[derive(Debug, Clone, Default)]
pub struct DialogStore;

#[cfg(feature = "native-ui")]
impl PresetSink for DialogStore {
    fn save(&self, suggested_name: &str, contents: &str) -> Result<Option<PathBuf>> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(suggested_name)
            .save_file()
        else {
            return Ok(None);
        };

        std::fs::write(&path, contents)
            .map_err(|e| PresetError::WriteFile(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Saved preset: {}", path.display());
        Ok(Some(path))
    }
}

#[cfg(feature = "native-ui")]
impl PresetPicker for DialogStore {
    fn pick(&self, _suggested_name: &str) -> Result<Option<String>> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return Ok(None);
        };

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| PresetError::ReadFile(format!("{}: {}", path.display(), e)))?;
        Ok(Some(contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_store_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::new(tmp.path().join("presets"));

        let saved = store.save("expression.json", "{}").unwrap();
        assert!(saved.is_some());

        let contents = store.pick("expression.json").unwrap();
        assert_eq!(contents.as_deref(), Some("{}"));
    }

    #[test]
    fn test_dir_store_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::new(tmp.path());
        assert!(store.pick("pose.json").is_err());
    }
}
