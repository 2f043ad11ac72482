//! Enumerating playlists from an XML library export.
//!
//! Each test writes its own export into an isolated `TempDir`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use playsync_library::{LibraryError, PlaylistSource, XmlLibrary};
use rstest::rstest;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Fixture builder
// ---------------------------------------------------------------------------

struct FixtureTrack<'a> {
    id: u64,
    name: Option<&'a str>,
    track_type: &'a str,
    location: Option<&'a str>,
}

fn file_track<'a>(id: u64, name: &'a str, location: &'a str) -> FixtureTrack<'a> {
    FixtureTrack {
        id,
        name: Some(name),
        track_type: "File",
        location: Some(location),
    }
}

struct FixturePlaylist<'a> {
    name: &'a str,
    extra: &'a str,
    items: &'a [u64],
}

fn user_playlist<'a>(name: &'a str, items: &'a [u64]) -> FixturePlaylist<'a> {
    FixturePlaylist {
        name,
        extra: "",
        items,
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn export_xml(tracks: &[FixtureTrack<'_>], playlists: &[FixturePlaylist<'_>]) -> String {
    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
        "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
        "<plist version=\"1.0\">\n<dict>\n",
        "<key>Major Version</key><integer>1</integer>\n",
        "<key>Tracks</key>\n<dict>\n",
    ));
    for t in tracks {
        xml.push_str(&format!(
            "<key>{0}</key>\n<dict>\n<key>Track ID</key><integer>{0}</integer>\n",
            t.id
        ));
        if let Some(name) = t.name {
            xml.push_str(&format!("<key>Name</key><string>{}</string>\n", escape(name)));
        }
        xml.push_str(&format!(
            "<key>Track Type</key><string>{}</string>\n",
            t.track_type
        ));
        if let Some(location) = t.location {
            xml.push_str(&format!(
                "<key>Location</key><string>{}</string>\n",
                escape(location)
            ));
        }
        xml.push_str("</dict>\n");
    }
    xml.push_str("</dict>\n<key>Playlists</key>\n<array>\n");
    for p in playlists {
        xml.push_str(&format!(
            "<dict>\n<key>Name</key><string>{}</string>\n{}",
            escape(p.name),
            p.extra
        ));
        xml.push_str("<key>Playlist Items</key>\n<array>\n");
        for id in p.items {
            xml.push_str(&format!(
                "<dict><key>Track ID</key><integer>{id}</integer></dict>\n"
            ));
        }
        xml.push_str("</array>\n</dict>\n");
    }
    xml.push_str("</array>\n</dict>\n</plist>\n");
    xml
}

fn write_export(dir: &TempDir, xml: &str) -> PathBuf {
    let path = dir.path().join("Library.xml");
    fs::write(&path, xml).expect("write export");
    path
}

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn standard_library(dir: &TempDir) -> XmlLibrary {
    let xml = export_xml(
        &[
            file_track(1, "Yellow", "file:///music/Coldplay/y.mp3"),
            file_track(2, "X", "file:///music/Coldplay/x.mp3"),
            file_track(3, "Locked", "file:///music/Store/locked.m4p"),
            FixtureTrack {
                id: 4,
                name: Some("Radio"),
                track_type: "URL",
                location: None,
            },
            file_track(5, "Intro", "file:///music/Daft%20Punk/01%20Intro.m4a"),
        ],
        &[
            FixturePlaylist {
                name: "Library",
                extra: "<key>Master</key><true/>\n",
                items: &[1, 2, 3, 5],
            },
            FixturePlaylist {
                name: "Music",
                extra: "<key>Distinguished Kind</key><integer>4</integer>\n",
                items: &[1, 2],
            },
            user_playlist("Rock", &[2, 1]),
            user_playlist("Mixed", &[3, 4, 5]),
            user_playlist("Empty", &[]),
        ],
    );
    XmlLibrary::open(write_export(dir, &xml)).expect("open library")
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
#[cfg(unix)]
fn playlist_tracks_keep_library_order_and_positions() {
    let dir = TempDir::new().unwrap();
    let library = standard_library(&dir);

    let snapshot = library.fetch(&names(&["Rock"])).expect("fetch");
    assert_eq!(snapshot.playlists.len(), 1);
    let rock = &snapshot.playlists[0];
    assert_eq!(rock.name.0, "Rock");

    let files: Vec<_> = rock.tracks.iter().map(|t| t.target_filename.as_str()).collect();
    assert_eq!(files, ["x.mp3", "y.mp3"]);
    let orders: Vec<_> = rock.tracks.iter().map(|t| t.play_order).collect();
    assert_eq!(orders, [1, 2]);
    assert_eq!(rock.tracks[0].display_name.as_deref(), Some("X"));

    assert_eq!(snapshot.files.len(), 2);
    assert_eq!(snapshot.files["y.mp3"], Path::new("/music/Coldplay/y.mp3"));
}

#[test]
#[cfg(unix)]
fn protected_and_remote_tracks_are_skipped_but_the_rest_survive() {
    let dir = TempDir::new().unwrap();
    let library = standard_library(&dir);

    let snapshot = library.fetch(&names(&["Mixed"])).expect("fetch");
    let mixed = &snapshot.playlists[0];
    assert_eq!(mixed.tracks.len(), 1);
    assert_eq!(mixed.tracks[0].target_filename, "01 Intro.m4a");
    assert_eq!(mixed.tracks[0].play_order, 3);
    assert_eq!(
        snapshot.files["01 Intro.m4a"],
        Path::new("/music/Daft Punk/01 Intro.m4a")
    );
    assert!(!snapshot.files.contains_key("locked.m4p"));
}

#[test]
fn empty_user_playlist_is_still_reported() {
    let dir = TempDir::new().unwrap();
    let library = standard_library(&dir);

    let snapshot = library.fetch(&names(&["Empty"])).expect("fetch");
    assert_eq!(snapshot.playlists.len(), 1);
    assert!(snapshot.playlists[0].tracks.is_empty());
    assert!(snapshot.files.is_empty());
}

#[rstest]
#[case("Library")]
#[case("Music")]
fn non_user_playlists_are_skipped(#[case] name: &str) {
    let dir = TempDir::new().unwrap();
    let library = standard_library(&dir);

    let snapshot = library.fetch(&names(&[name])).expect("fetch");
    assert!(snapshot.playlists.is_empty());
    assert!(snapshot.files.is_empty());
}

#[test]
#[cfg(unix)]
fn multiple_playlists_are_processed_in_name_order() {
    let dir = TempDir::new().unwrap();
    let library = standard_library(&dir);

    let snapshot = library.fetch(&names(&["Rock", "Empty", "Mixed"])).expect("fetch");
    let order: Vec<_> = snapshot.playlists.iter().map(|p| p.name.0.as_str()).collect();
    assert_eq!(order, ["Empty", "Mixed", "Rock"]);
    assert_eq!(snapshot.files.len(), 3);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn missing_export_is_a_connect_error() {
    let dir = TempDir::new().unwrap();
    let err = XmlLibrary::open(dir.path().join("absent.xml")).unwrap_err();
    assert!(matches!(err, LibraryError::Connect { .. }), "got: {err}");
    assert!(err.to_string().contains("absent.xml"));
}

#[test]
fn garbage_export_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_export(&dir, "this is not a property list");
    let err = XmlLibrary::open(path).unwrap_err();
    assert!(matches!(err, LibraryError::Parse { .. }), "got: {err}");
}

#[test]
fn unknown_playlist_is_fatal() {
    let dir = TempDir::new().unwrap();
    let library = standard_library(&dir);

    let err = library.fetch(&names(&["Rock", "Jazz"])).unwrap_err();
    assert!(matches!(err, LibraryError::PlaylistNotFound { .. }), "got: {err}");
    assert_eq!(err.to_string(), "failed to get playlist Jazz");
}

#[test]
#[cfg(unix)]
fn dangling_track_reference_is_fatal() {
    let dir = TempDir::new().unwrap();
    let xml = export_xml(
        &[file_track(1, "A", "/music/a.mp3")],
        &[user_playlist("Rock", &[1, 99])],
    );
    let library = XmlLibrary::open(write_export(&dir, &xml)).unwrap();

    let err = library.fetch(&names(&["Rock"])).unwrap_err();
    assert!(
        matches!(err, LibraryError::TrackNotFound { track_id: 99, .. }),
        "got: {err}"
    );
}

#[test]
fn file_track_without_location_is_fatal() {
    let dir = TempDir::new().unwrap();
    let xml = export_xml(
        &[FixtureTrack {
            id: 1,
            name: None,
            track_type: "File",
            location: None,
        }],
        &[user_playlist("Rock", &[1])],
    );
    let library = XmlLibrary::open(write_export(&dir, &xml)).unwrap();

    let err = library.fetch(&names(&["Rock"])).unwrap_err();
    assert!(matches!(err, LibraryError::MissingLocation { .. }), "got: {err}");
    assert_eq!(
        err.to_string(),
        "failed to get location for song at index 0 in playlist Rock"
    );
}

#[test]
fn relative_location_is_fatal() {
    let dir = TempDir::new().unwrap();
    let xml = export_xml(
        &[file_track(1, "A", "relative/a.mp3")],
        &[user_playlist("Rock", &[1])],
    );
    let library = XmlLibrary::open(write_export(&dir, &xml)).unwrap();

    let err = library.fetch(&names(&["Rock"])).unwrap_err();
    assert!(matches!(err, LibraryError::InvalidLocation { .. }), "got: {err}");
}
