//! Shared sync pipeline entrypoint.
//!
//! Order is fixed: validate playlist names → scan → delete → copy → write
//! playlists. The first error stops the run; nothing already done is rolled
//! back.

use std::collections::BTreeSet;

use playsync_core::{media, LibrarySnapshot, SortMode, TargetDir};

use crate::reconcile::{self, FileAction};
use crate::{playlist, target, SyncError};

/// Knobs for a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub sort_mode: SortMode,
    pub dry_run: bool,
}

/// Everything a run did (or, in dry-run mode, would have done).
#[derive(Debug, Default)]
pub struct SyncReport {
    pub deletions: Vec<FileAction>,
    pub copies: Vec<FileAction>,
    pub playlists: Vec<FileAction>,
}

/// Converge `target` to `snapshot` and write one playlist file per snapshot playlist.
///
/// Playlist files about to be regenerated are never deletion candidates, so
/// an unchanged library yields no deletes and no copies on a second run.
pub fn run(
    target: &TargetDir,
    snapshot: &LibrarySnapshot,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    // Reject unusable playlist names before anything on the target changes.
    let regenerated = snapshot
        .playlists
        .iter()
        .map(|p| {
            playlist::playlist_path(target, &p.name).map(|_| media::playlist_filename(&p.name.0))
        })
        .collect::<Result<BTreeSet<String>, SyncError>>()?;

    let observed = target::scan_target(target)?;
    let deletions: BTreeSet<String> = reconcile::compute_deletions(&observed, &snapshot.files)
        .difference(&regenerated)
        .cloned()
        .collect();
    let deletions = reconcile::apply_deletions(target, &deletions, options.dry_run)?;

    let copies = reconcile::compute_copies(target, &observed, &snapshot.files)?;
    let copies = reconcile::apply_copies(target, &copies, options.dry_run)?;

    let mut playlists = Vec::with_capacity(snapshot.playlists.len());
    for pl in &snapshot.playlists {
        playlists.push(playlist::write_playlist(
            target,
            &pl.name,
            &pl.tracks,
            options.sort_mode,
            options.dry_run,
        )?);
    }

    Ok(SyncReport {
        deletions,
        copies,
        playlists,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_snapshot_on_empty_target_does_nothing() {
        let usb = TempDir::new().expect("usb");
        let target = TargetDir::new(usb.path()).expect("target");
        let report = run(&target, &LibrarySnapshot::default(), &SyncOptions::default())
            .expect("run");
        assert!(report.deletions.is_empty());
        assert!(report.copies.is_empty());
        assert!(report.playlists.is_empty());
    }

    #[test]
    fn stale_playlist_files_are_deleted_but_current_ones_are_kept() {
        let usb = TempDir::new().expect("usb");
        std::fs::write(usb.path().join("Rock.m3u"), b"").expect("write");
        std::fs::write(usb.path().join("Retired.m3u"), b"").expect("write");
        let target = TargetDir::new(usb.path()).expect("target");

        let mut snapshot = LibrarySnapshot::default();
        snapshot.add_playlist("Rock");

        let report = run(&target, &snapshot, &SyncOptions::default()).expect("run");
        assert_eq!(
            report.deletions,
            vec![FileAction::Deleted {
                path: usb.path().join("Retired.m3u")
            }]
        );
        assert!(usb.path().join("Rock.m3u").exists());
    }

    #[test]
    fn unusable_playlist_name_fails_before_any_mutation() {
        let library = TempDir::new().expect("library");
        let usb = TempDir::new().expect("usb");
        let src = library.path().join("a.mp3");
        std::fs::write(&src, b"aaaa").expect("write");
        std::fs::write(usb.path().join("old.mp3"), b"old").expect("write");
        let target = TargetDir::new(usb.path()).expect("target");

        for name in ["AC/DC", "../Escaped"] {
            let mut snapshot = LibrarySnapshot::default();
            let rock = snapshot.add_playlist("Rock");
            let bad = snapshot.add_playlist(name);
            let track = playsync_core::Track::from_source(None, &src, 1).expect("track");
            snapshot.add_track(rock, track.clone());
            snapshot.add_track(bad, track);

            let err = run(&target, &snapshot, &SyncOptions::default()).unwrap_err();
            assert!(
                matches!(&err, SyncError::InvalidPlaylistName { name: n } if n == name),
                "got: {err}"
            );
            assert!(usb.path().join("old.mp3").exists());
            assert!(!usb.path().join("a.mp3").exists());
            assert!(!usb.path().join("Rock.m3u").exists());
            assert!(!usb.path().parent().unwrap().join("Escaped.m3u").exists());
        }
    }
}
