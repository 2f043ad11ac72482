//! # playsync-sync
//!
//! Reconciles a flat target directory against a
//! [`LibrarySnapshot`](playsync_core::LibrarySnapshot) and writes playlist files.
//!
//! Call [`pipeline::run`] for a full pass, or use the pieces directly:
//! [`scan_target`], [`reconcile`], [`write_playlist`].

mod atomic;
pub mod error;
pub mod pipeline;
pub mod playlist;
pub mod reconcile;
pub mod target;

pub use error::SyncError;
pub use pipeline::{SyncOptions, SyncReport};
pub use playlist::write_playlist;
pub use reconcile::FileAction;
pub use target::scan_target;
