//! Error types for playsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from settings and target-directory handling.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure, with the path that was being accessed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::config_dir()` returned `None`.
    #[error("cannot determine configuration directory; set $HOME or equivalent")]
    ConfigDirNotFound,

    /// The target directory does not exist.
    #[error("{} does not exist", path.display())]
    TargetMissing { path: PathBuf },

    /// The target path exists but is not a directory.
    #[error("{} is not a directory", path.display())]
    TargetNotDirectory { path: PathBuf },
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
