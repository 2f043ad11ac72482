//! iTunes-style XML library export.
//!
//! The export is a property list with a `Tracks` dictionary keyed by track id
//! and a `Playlists` array whose `Playlist Items` reference those ids:
//!
//! ```text
//! Tracks
//!   "101" -> { Track ID, Name, Track Type = File, Location = file:///.../a.mp3 }
//! Playlists
//!   [ { Name = Library, Master = true, Playlist Items = [...] },
//!     { Name = Rock, Playlist Items = [ { Track ID = 101 }, ... ] } ]
//! ```
//!
//! Play order is the 1-based position of an item within `Playlist Items`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use playsync_core::{media, LibrarySnapshot, Track};

use crate::{LibraryError, PlaylistSource};

// ---------------------------------------------------------------------------
// Export model
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct LibraryExport {
    #[serde(rename = "Tracks", default)]
    tracks: BTreeMap<String, TrackRecord>,
    #[serde(rename = "Playlists", default)]
    playlists: Vec<PlaylistRecord>,
}

#[derive(Debug, Deserialize)]
struct TrackRecord {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Location")]
    location: Option<String>,
    /// `File`, `URL` or `Remote`. Older exports omit it for local files.
    #[serde(rename = "Track Type")]
    track_type: Option<String>,
}

impl TrackRecord {
    fn is_file(&self) -> bool {
        self.track_type.as_deref().map_or(true, |t| t == "File")
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistRecord {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Master", default)]
    master: bool,
    /// Present on library-managed playlists (Music, Movies, Podcasts, ...).
    #[serde(rename = "Distinguished Kind")]
    distinguished_kind: Option<u64>,
    #[serde(rename = "Playlist Items", default)]
    items: Vec<PlaylistItem>,
}

impl PlaylistRecord {
    fn is_user(&self) -> bool {
        !self.master && self.distinguished_kind.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    #[serde(rename = "Track ID")]
    track_id: u64,
}

// ---------------------------------------------------------------------------
// XmlLibrary
// ---------------------------------------------------------------------------

/// A parsed XML library export.
#[derive(Debug)]
pub struct XmlLibrary {
    path: PathBuf,
    export: LibraryExport,
}

impl XmlLibrary {
    /// Open and parse the export at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let path = path.into();
        let file = File::open(&path).map_err(|source| LibraryError::Connect {
            path: path.clone(),
            source,
        })?;
        let export = plist::from_reader(BufReader::new(file)).map_err(|source| {
            LibraryError::Parse {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!("loaded library export {}", path.display());
        Ok(Self { path, export })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlaylistSource for XmlLibrary {
    fn fetch(&self, names: &BTreeSet<String>) -> Result<LibrarySnapshot, LibraryError> {
        let mut snapshot = LibrarySnapshot::default();

        for name in names {
            let playlist = self
                .export
                .playlists
                .iter()
                .find(|p| &p.name == name)
                .ok_or_else(|| LibraryError::PlaylistNotFound { name: name.clone() })?;

            if !playlist.is_user() {
                tracing::debug!("skipping non-user playlist {name}");
                continue;
            }

            let index = snapshot.add_playlist(name.as_str());
            for (position, item) in playlist.items.iter().enumerate() {
                if let Some(track) = self.resolve_track(name, position, item)? {
                    snapshot.add_track(index, track);
                }
            }
        }

        Ok(snapshot)
    }
}

impl XmlLibrary {
    /// `Ok(None)` for tracks that are deliberately skipped.
    fn resolve_track(
        &self,
        playlist: &str,
        position: usize,
        item: &PlaylistItem,
    ) -> Result<Option<Track>, LibraryError> {
        let record = self
            .export
            .tracks
            .get(&item.track_id.to_string())
            .ok_or_else(|| LibraryError::TrackNotFound {
                playlist: playlist.to_owned(),
                track_id: item.track_id,
            })?;

        if !record.is_file() {
            return Ok(None);
        }

        let location = record
            .location
            .as_deref()
            .ok_or_else(|| LibraryError::MissingLocation {
                playlist: playlist.to_owned(),
                song: match &record.name {
                    Some(name) if !name.is_empty() => name.clone(),
                    _ => format!("at index {position}"),
                },
            })?;

        let invalid = || LibraryError::InvalidLocation {
            playlist: playlist.to_owned(),
            location: location.to_owned(),
        };
        let path = location_to_path(location).ok_or_else(invalid)?;
        let track = Track::from_source(record.name.clone(), path, position as i64 + 1)
            .ok_or_else(invalid)?;

        if media::is_protected(&track.target_filename) {
            tracing::warn!("skipping protected file {}", track.target_filename);
            return Ok(None);
        }

        Ok(Some(track))
    }
}

/// `file://` URLs are percent-decoded; bare absolute paths pass through.
fn location_to_path(location: &str) -> Option<PathBuf> {
    if location.starts_with("file:") {
        return Url::parse(location).ok()?.to_file_path().ok();
    }
    let path = PathBuf::from(location);
    path.is_absolute().then_some(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
