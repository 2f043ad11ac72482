//! Fixed extension tables.
//!
//! Matching is ASCII case-insensitive and looks only at the text after the
//! last `.` of a bare filename.

/// Extensions the target enumerator treats as managed files.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["m3u", "mp3", "m4a"];

/// Extension of DRM-protected audio that can never be copied.
pub const PROTECTED_EXTENSION: &str = "m4p";

/// Extension of generated playlist files.
pub const PLAYLIST_EXTENSION: &str = "m3u";

/// Text after the last `.` in `filename`, or `""` when there is no dot.
pub fn extension_of(filename: &str) -> &str {
    filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

/// `true` if `filename` carries one of [`RECOGNIZED_EXTENSIONS`].
pub fn is_recognized(filename: &str) -> bool {
    let ext = extension_of(filename);
    !ext.is_empty()
        && RECOGNIZED_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
}

/// `true` if `filename` carries [`PROTECTED_EXTENSION`].
pub fn is_protected(filename: &str) -> bool {
    extension_of(filename).eq_ignore_ascii_case(PROTECTED_EXTENSION)
}

/// `<playlist>.m3u`
pub fn playlist_filename(playlist: &str) -> String {
    format!("{playlist}.{PLAYLIST_EXTENSION}")
}
