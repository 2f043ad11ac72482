//! The capability the sync pipeline needs from a media library.

use std::collections::BTreeSet;

use playsync_core::LibrarySnapshot;

use crate::LibraryError;

/// Anything that can answer "given these playlist names, which tracks do they hold?".
pub trait PlaylistSource {
    /// Enumerate the requested playlists.
    ///
    /// Implementations skip non-user playlists and tracks that are not
    /// locally-backed files, drop protected tracks with a warning, and fail on
    /// any other lookup error.
    fn fetch(&self, names: &BTreeSet<String>) -> Result<LibrarySnapshot, LibraryError>;
}
