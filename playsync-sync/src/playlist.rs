//! Playlist writer: dedupe → order → serialise to `<name>.m3u`.
//!
//! The file format is one UTF-8 filename per line, each terminated by
//! `\r\n` on every platform. No header and no extended M3U directives.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use playsync_core::{media, PlaylistName, SortMode, TargetDir, Track};

use crate::atomic;
use crate::reconcile::FileAction;
use crate::SyncError;

/// One line of a written playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub filename: String,
    pub display_name: Option<String>,
    pub play_order: i64,
}

/// Collapse duplicate filenames (the last occurrence wins) and order the
/// survivors according to `mode`. Ties keep filename order.
pub fn order_tracks(tracks: &[Track], mode: SortMode) -> Vec<PlaylistEntry> {
    let mut unique: BTreeMap<&str, &Track> = BTreeMap::new();
    for track in tracks {
        unique.insert(&track.target_filename, track);
    }

    let mut entries: Vec<PlaylistEntry> = unique
        .into_values()
        .map(|track| PlaylistEntry {
            filename: track.target_filename.clone(),
            display_name: track.display_name.clone().filter(|n| !n.is_empty()),
            play_order: track.play_order,
        })
        .collect();

    match mode {
        SortMode::PlayOrder => entries.sort_by_key(|e| e.play_order),
        SortMode::Name => entries.sort_by_cached_key(|e| {
            sort_key(e.display_name.as_deref().unwrap_or(&e.filename))
        }),
    }
    entries
}

/// Name-mode sort key.
///
/// Strips one leading `NN ` or `NN-NN ` track number, then one leading
/// `A ` or `The ` article, then lowercases ASCII only.
pub fn sort_key(name: &str) -> String {
    strip_article(strip_track_number(name)).to_ascii_lowercase()
}

fn strip_track_number(s: &str) -> &str {
    match s.split_once(' ') {
        Some((word, rest)) if is_track_number(word) => rest,
        _ => s,
    }
}

fn is_track_number(word: &str) -> bool {
    match word.as_bytes() {
        [a, b] => a.is_ascii_digit() && b.is_ascii_digit(),
        [a, b, b'-', c, d] => [a, b, c, d].iter().all(|x| x.is_ascii_digit()),
        _ => false,
    }
}

fn strip_article(s: &str) -> &str {
    match s.split_once(' ') {
        Some((word, rest)) if word.eq_ignore_ascii_case("a") || word.eq_ignore_ascii_case("the") => {
            rest
        }
        _ => s,
    }
}

/// Serialise entries in order: filename + CRLF each.
pub fn render(entries: &[PlaylistEntry]) -> Vec<u8> {
    let mut out = Vec::new();
    for entry in entries {
        out.extend_from_slice(entry.filename.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    out
}

/// `<target>/<name>.m3u`, or [`SyncError::InvalidPlaylistName`] when the name
/// would not land directly inside the target.
pub fn playlist_path(target: &TargetDir, name: &PlaylistName) -> Result<PathBuf, SyncError> {
    let filename = media::playlist_filename(&name.0);
    let mut components = Path::new(&filename).components();
    let bare = !name.0.is_empty()
        && !name.0.contains(&['/', '\\'][..])
        && matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
    if !bare {
        return Err(SyncError::InvalidPlaylistName {
            name: name.0.clone(),
        });
    }
    Ok(target.join(&filename))
}

/// Write `<target>/<name>.m3u` for `tracks`, replacing any existing file.
pub fn write_playlist(
    target: &TargetDir,
    name: &PlaylistName,
    tracks: &[Track],
    mode: SortMode,
    dry_run: bool,
) -> Result<FileAction, SyncError> {
    let path = playlist_path(target, name)?;
    let content = render(&order_tracks(tracks, mode));

    if dry_run {
        tracing::info!("[dry-run] would write {}", path.display());
        return Ok(FileAction::WouldWrite { path });
    }

    atomic::write_atomic(&path, &content).map_err(|source| SyncError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!("wrote {}", path.display());
    Ok(FileAction::Wrote { path })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
