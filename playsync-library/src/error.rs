//! Error types for playsync-library.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while enumerating playlists. Every variant names
/// the step that failed.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The library export could not be opened.
    #[error("failed to connect to library at {}: {source}", path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The library export is not a readable property list.
    #[error("failed to read library sources from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },

    #[error("failed to get playlist {name}")]
    PlaylistNotFound { name: String },

    #[error("failed to get track {track_id} in playlist {playlist}")]
    TrackNotFound { playlist: String, track_id: u64 },

    #[error("failed to get location for song {song} in playlist {playlist}")]
    MissingLocation { playlist: String, song: String },

    #[error("cannot convert location {location} in playlist {playlist} to a local path")]
    InvalidLocation { playlist: String, location: String },
}
