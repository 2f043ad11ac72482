//! Domain types for a single sync run.
//!
//! Desired state ([`LibrarySnapshot`]) and observed state ([`ObservedFileSet`])
//! are built fresh on every invocation and never persisted.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed playlist name as reported by the media library.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaylistName(pub String);

impl fmt::Display for PlaylistName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PlaylistName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlaylistName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Ordering policy for written playlist files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Ascending library play-order index.
    #[default]
    PlayOrder,
    /// Case-insensitive normalised display name (or filename).
    Name,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::PlayOrder => write!(f, "play-order"),
            SortMode::Name => write!(f, "name"),
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "play-order" | "playorder" | "order" => Ok(Self::PlayOrder),
            "name" => Ok(Self::Name),
            other => Err(format!(
                "unknown sort mode '{other}'; expected: play-order, name"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Tracks and playlists
// ---------------------------------------------------------------------------

/// One track reference inside a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub display_name: Option<String>,
    /// Bare filename used on the target; the join key between desired and observed state.
    pub target_filename: String,
    pub source_path: PathBuf,
    pub play_order: i64,
}

impl Track {
    /// Build a track whose target filename is the final component of `source_path`.
    ///
    /// Returns `None` when the path has no UTF-8 final component.
    pub fn from_source(
        display_name: Option<String>,
        source_path: impl Into<PathBuf>,
        play_order: i64,
    ) -> Option<Self> {
        let source_path = source_path.into();
        let target_filename = source_path.file_name()?.to_str()?.to_owned();
        Some(Self {
            display_name: display_name.filter(|n| !n.is_empty()),
            target_filename,
            source_path,
            play_order,
        })
    }
}

/// An ordered playlist as reported by the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub name: PlaylistName,
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(name: impl Into<PlaylistName>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }
}

/// Bare target filename → source path, across all requested playlists.
pub type DesiredFileMap = BTreeMap<String, PathBuf>;

/// Bare filenames of recognised files present in the target directory.
pub type ObservedFileSet = BTreeSet<String>;

/// Desired state for one run: every requested playlist plus the aggregate
/// file map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySnapshot {
    pub playlists: Vec<Playlist>,
    pub files: DesiredFileMap,
}

impl LibrarySnapshot {
    /// Register an (initially empty) playlist and return its index.
    pub fn add_playlist(&mut self, name: impl Into<PlaylistName>) -> usize {
        self.playlists.push(Playlist::new(name));
        self.playlists.len() - 1
    }

    /// Append `track` to the playlist at `playlist` and bind its filename in
    /// the file map. Later bindings replace earlier ones.
    ///
    /// # Panics
    ///
    /// Panics if `playlist` is not an index returned by [`add_playlist`](Self::add_playlist).
    pub fn add_track(&mut self, playlist: usize, track: Track) {
        if let Some(previous) = self
            .files
            .insert(track.target_filename.clone(), track.source_path.clone())
        {
            if previous != track.source_path {
                tracing::warn!(
                    "{} maps to both {} and {}; using the latter",
                    track.target_filename,
                    previous.display(),
                    track.source_path.display()
                );
            }
        }
        self.playlists[playlist].tracks.push(track);
    }
}

// ---------------------------------------------------------------------------
// Target directory
// ---------------------------------------------------------------------------

/// A validated, existing target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDir(PathBuf);

impl TargetDir {
    /// Validate that `path` exists and is a directory.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let meta = match std::fs::metadata(&path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::TargetMissing { path });
            }
            Err(source) => return Err(io_err(path, source)),
        };
        if !meta.is_dir() {
            return Err(CoreError::TargetNotDirectory { path });
        }
        Ok(Self(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Path of a bare filename directly inside the target.
    pub fn join(&self, filename: &str) -> PathBuf {
        self.0.join(filename)
    }
}

impl fmt::Display for TargetDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
