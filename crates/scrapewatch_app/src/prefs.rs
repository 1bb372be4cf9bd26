//! Persisted view preferences.
//!
//! A tiny ron file in the working directory remembers how the user last
//! viewed the monitor. It is owned entirely by the app; the engine never
//! reads or writes it.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use watch_logging::{watch_info, watch_warn};

const PREFS_FILENAME: &str = ".scrapewatch_prefs.ron";

/// Which collection the monitor renders on each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ViewMode {
    Summary,
    Pages,
    Files,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewPrefs {
    pub view_mode: ViewMode,
    /// Free-form labels the user has attached to past runs.
    pub saved_tags: Vec<String>,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Summary,
            saved_tags: Vec::new(),
        }
    }
}

/// Loads preferences from `dir`, falling back to defaults on a missing or
/// unreadable file.
pub fn load(dir: &Path) -> ViewPrefs {
    let path = dir.join(PREFS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ViewPrefs::default();
        }
        Err(err) => {
            watch_warn!("Failed to read preferences from {:?}: {}", path, err);
            return ViewPrefs::default();
        }
    };

    match ron::from_str(&content) {
        Ok(prefs) => prefs,
        Err(err) => {
            watch_warn!("Failed to parse preferences from {:?}: {}", path, err);
            ViewPrefs::default()
        }
    }
}

/// Writes preferences atomically: temp file in the same directory, then
/// rename over the target.
pub fn save(dir: &Path, prefs: &ViewPrefs) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(prefs, pretty) {
        Ok(text) => text,
        Err(err) => {
            watch_warn!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    let target = dir.join(PREFS_FILENAME);
    let result = NamedTempFile::new_in(dir).and_then(|mut tmp| {
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&target).map_err(|err| err.error)?;
        Ok(())
    });
    match result {
        Ok(()) => watch_info!("Saved preferences to {:?}", target),
        Err(err) => watch_warn!("Failed to write preferences to {:?}: {}", target, err),
    }
}
