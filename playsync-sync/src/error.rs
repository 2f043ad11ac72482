//! Error types for playsync-sync.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while reconciling a target directory.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The target directory could not be listed.
    #[error("error finding files in {}: {source}", path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file size could not be read.
    #[error("unable to read size of {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A playlist file could not be written.
    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A playlist name that cannot be a bare filename inside the target.
    #[error("invalid playlist name {name:?}: must not contain path separators or be a relative path component")]
    InvalidPlaylistName { name: String },
}
