//! Reconciler: set differences between desired and observed state, and the
//! filesystem mutations that close them.
//!
//! Deletions are applied before copies so a stale file is gone before its
//! replacement lands. The first failure in either phase aborts the run.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use playsync_core::{media, DesiredFileMap, ObservedFileSet, TargetDir};

use crate::atomic;
use crate::SyncError;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Outcome of an individual filesystem mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    Deleted { path: PathBuf },
    Copied { path: PathBuf },
    Wrote { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been deleted.
    WouldDelete { path: PathBuf },
    WouldCopy { path: PathBuf },
    WouldWrite { path: PathBuf },
}

impl FileAction {
    pub fn path(&self) -> &Path {
        match self {
            FileAction::Deleted { path }
            | FileAction::Copied { path }
            | FileAction::Wrote { path }
            | FileAction::WouldDelete { path }
            | FileAction::WouldCopy { path }
            | FileAction::WouldWrite { path } => path,
        }
    }
}

/// Why a desired file needs copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyReason {
    Missing,
    SizeMismatch { source_len: u64, target_len: u64 },
}

/// A desired file that is absent or stale on the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCandidate {
    pub filename: String,
    pub source: PathBuf,
    pub reason: CopyReason,
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Observed filenames that no desired file claims.
pub fn compute_deletions(observed: &ObservedFileSet, desired: &DesiredFileMap) -> BTreeSet<String> {
    observed
        .iter()
        .filter(|name| !desired.contains_key(*name))
        .cloned()
        .collect()
}

/// Desired files that are missing from the target or whose byte length differs
/// from the source.
pub fn compute_copies(
    target: &TargetDir,
    observed: &ObservedFileSet,
    desired: &DesiredFileMap,
) -> Result<Vec<CopyCandidate>, SyncError> {
    let mut copies = Vec::new();
    for (filename, source) in desired {
        let reason = if !is_present(target, observed, filename) {
            CopyReason::Missing
        } else {
            let source_len = file_len(source)?;
            let target_len = file_len(&target.join(filename))?;
            if source_len == target_len {
                continue;
            }
            CopyReason::SizeMismatch {
                source_len,
                target_len,
            }
        };
        copies.push(CopyCandidate {
            filename: filename.clone(),
            source: source.clone(),
            reason,
        });
    }
    Ok(copies)
}

/// Recognised names come from the scan; anything else is checked on disk,
/// since the scan never reports it.
fn is_present(target: &TargetDir, observed: &ObservedFileSet, filename: &str) -> bool {
    if media::is_recognized(filename) {
        observed.contains(filename)
    } else {
        target.join(filename).is_file()
    }
}

fn file_len(path: &Path) -> Result<u64, SyncError> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| SyncError::Metadata {
            path: path.to_path_buf(),
            source,
        })
}

// ---------------------------------------------------------------------------
// Applying
// ---------------------------------------------------------------------------

/// Delete every named file from `target`, stopping at the first failure.
pub fn apply_deletions(
    target: &TargetDir,
    deletions: &BTreeSet<String>,
    dry_run: bool,
) -> Result<Vec<FileAction>, SyncError> {
    let mut actions = Vec::with_capacity(deletions.len());
    for filename in deletions {
        let path = target.join(filename);
        if dry_run {
            tracing::info!("[dry-run] would delete {}", path.display());
            actions.push(FileAction::WouldDelete { path });
            continue;
        }
        std::fs::remove_file(&path).map_err(|source| SyncError::Delete {
            path: path.clone(),
            source,
        })?;
        tracing::info!("deleted {}", path.display());
        actions.push(FileAction::Deleted { path });
    }
    Ok(actions)
}

/// Copy every candidate into `target`, overwriting, stopping at the first failure.
pub fn apply_copies(
    target: &TargetDir,
    copies: &[CopyCandidate],
    dry_run: bool,
) -> Result<Vec<FileAction>, SyncError> {
    let mut actions = Vec::with_capacity(copies.len());
    for copy in copies {
        let path = target.join(&copy.filename);
        let stale = match copy.reason {
            CopyReason::SizeMismatch {
                source_len,
                target_len,
            } => {
                tracing::debug!(
                    "{} is stale ({target_len} bytes on target, {source_len} in library)",
                    copy.filename
                );
                true
            }
            CopyReason::Missing => false,
        };
        if dry_run {
            tracing::info!("[dry-run] would copy {}", path.display());
            actions.push(FileAction::WouldCopy { path });
            continue;
        }
        // Old and new copies never coexist on the target.
        if stale {
            std::fs::remove_file(&path).map_err(|source| SyncError::Delete {
                path: path.clone(),
                source,
            })?;
        }
        atomic::copy_atomic(&copy.source, &path).map_err(|source| SyncError::Copy {
            from: copy.source.clone(),
            to: path.clone(),
            source,
        })?;
        tracing::info!("copied {}", path.display());
        actions.push(FileAction::Copied { path });
    }
    Ok(actions)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
