//! # playsync-library
//!
//! Source enumerator: turns requested playlist names into a
//! [`LibrarySnapshot`](playsync_core::LibrarySnapshot) of tracks and the
//! aggregate desired-file map.
//!
//! [`PlaylistSource`] is the capability the sync pipeline consumes;
//! [`XmlLibrary`] implements it over an iTunes-style XML library export.

pub mod error;
pub mod source;
pub mod xml;

pub use error::LibraryError;
pub use source::PlaylistSource;
pub use xml::XmlLibrary;
