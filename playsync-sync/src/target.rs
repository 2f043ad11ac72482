//! Target enumerator: the observed state of the target directory.

use std::ffi::OsString;

use playsync_core::{media, ObservedFileSet, TargetDir};

use crate::{atomic, SyncError};

/// List recognised files directly inside `target` (non-recursive).
///
/// Subdirectories and files with other extensions are logged and skipped.
/// Temporary files left behind by an interrupted write are observed, so the
/// deletion phase removes them. Any listing error is fatal, before anything
/// has been modified.
pub fn scan_target(target: &TargetDir) -> Result<ObservedFileSet, SyncError> {
    let enumerate_err = |source| SyncError::Enumerate {
        path: target.path().to_path_buf(),
        source,
    };

    let mut observed = ObservedFileSet::new();
    for entry in std::fs::read_dir(target.path()).map_err(enumerate_err)? {
        let entry = entry.map_err(enumerate_err)?;
        let file_type = entry.file_type().map_err(enumerate_err)?;
        let name = entry.file_name();

        if file_type.is_dir() {
            tracing::info!("ignoring directory {}", name.to_string_lossy());
            continue;
        }

        match recognised_name(name) {
            Ok(name) => {
                observed.insert(name);
            }
            Err(name) => tracing::info!("ignoring file {}", name.to_string_lossy()),
        }
    }

    tracing::debug!("found {} managed file(s) in {target}", observed.len());
    Ok(observed)
}

fn recognised_name(name: OsString) -> Result<String, OsString> {
    let name = name.into_string()?;
    if atomic::is_tmp_name(&name) {
        tracing::debug!("found leftover temporary file {name}");
        Ok(name)
    } else if media::is_recognized(&name) {
        Ok(name)
    } else {
        Err(name.into())
    }
}
