//! Optional YAML settings file.
//!
//! # Storage layout
//!
//! ```text
//! <config_dir>/
//!   playsync/
//!     config.yaml
//! ```
//!
//! ```yaml
//! library: /Users/me/Music/iTunes/iTunes Music Library.xml
//! sort: name
//! ```
//!
//! # API pattern
//!
//! - `load_at(path)`: explicit file; used in tests with `TempDir`
//! - `load()`: resolves [`default_path`], delegates to `load_at`
//!
//! A missing file is not an error; it yields [`Settings::default`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};
use crate::types::SortMode;

/// Values read from the settings file. Every field is optional on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Path to the XML library export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<PathBuf>,
    /// Playlist ordering policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortMode>,
}

/// `<config_dir>/playsync/config.yaml`
pub fn default_path() -> Result<PathBuf, CoreError> {
    let dir = dirs::config_dir().ok_or(CoreError::ConfigDirNotFound)?;
    Ok(dir.join("playsync").join("config.yaml"))
}

/// Library export location used when neither the CLI nor the settings file names one.
///
/// `<audio_dir or ~/Music>/iTunes/iTunes Music Library.xml`
pub fn default_library_path() -> Option<PathBuf> {
    let music = dirs::audio_dir().or_else(|| dirs::home_dir().map(|h| h.join("Music")))?;
    Some(music.join("iTunes").join("iTunes Music Library.xml"))
}

/// Load settings from `path`.
///
/// Returns defaults if the file does not exist, and
/// `CoreError::Parse` (with path + line context) if it is malformed.
pub fn load_at(path: &Path) -> Result<Settings, CoreError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!("no settings file at {}", path.display());
            return Ok(Settings::default());
        }
        Err(source) => return Err(io_err(path, source)),
    };
    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| CoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Settings, CoreError> {
    load_at(&default_path()?)
}
