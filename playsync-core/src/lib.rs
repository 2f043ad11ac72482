//! playsync core library: domain types, extension tables, settings, errors.
//!
//! Public API surface:
//! - [`types`]: newtypes, tracks, playlists, desired/observed state
//! - [`media`]: recognised and protected file extensions
//! - [`settings`]: optional YAML settings file
//! - [`error`]: [`CoreError`]

pub mod error;
pub mod media;
pub mod settings;
pub mod types;

pub use error::CoreError;
pub use settings::Settings;
pub use types::{
    DesiredFileMap, LibrarySnapshot, ObservedFileSet, Playlist, PlaylistName, SortMode,
    TargetDir, Track,
};
