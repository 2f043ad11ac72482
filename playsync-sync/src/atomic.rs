//! Temp-file-then-rename primitives for everything written to the target.
//!
//! 1. Write (or copy) the new bytes to `<path>.playsync.tmp`.
//! 2. Flush to the device.
//! 3. Rename over the final path (atomic on POSIX, replace-existing on Windows).
//!
//! On failure the temporary file is removed and any existing file at the
//! final path is left untouched.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub(crate) const TMP_SUFFIX: &str = ".playsync.tmp";

/// `<path>.playsync.tmp`
pub(crate) fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(TMP_SUFFIX);
    PathBuf::from(tmp)
}

/// `true` for names produced by [`tmp_path_for`].
pub(crate) fn is_tmp_name(filename: &str) -> bool {
    filename.len() > TMP_SUFFIX.len() && filename.ends_with(TMP_SUFFIX)
}

/// Replace `path` with `content`.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    write_atomic_with_tmp(path, content, &tmp_path_for(path))
}

/// Replace `dst` with a copy of `src`. Returns the number of bytes copied.
pub(crate) fn copy_atomic(src: &Path, dst: &Path) -> io::Result<u64> {
    copy_atomic_with_tmp(src, dst, &tmp_path_for(dst))
}

fn write_atomic_with_tmp(path: &Path, content: &[u8], tmp: &Path) -> io::Result<()> {
    let result = write_tmp(tmp, content).and_then(|()| fs::rename(tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(tmp);
    }
    result
}

fn write_tmp(tmp: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(content)?;
    file.sync_all()
}

fn copy_atomic_with_tmp(src: &Path, dst: &Path, tmp: &Path) -> io::Result<u64> {
    let result = copy_tmp(src, tmp).and_then(|len| fs::rename(tmp, dst).map(|()| len));
    if result.is_err() {
        let _ = fs::remove_file(tmp);
    }
    result
}

fn copy_tmp(src: &Path, tmp: &Path) -> io::Result<u64> {
    let len = fs::copy(src, tmp)?;
    File::options().write(true).open(tmp)?.sync_all()?;
    Ok(len)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
