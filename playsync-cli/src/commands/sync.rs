//! `playsync <target> <playlist>...`: mirror playlists onto a flat directory.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use playsync_core::{settings, Settings, SortMode, TargetDir};
use playsync_library::{PlaylistSource, XmlLibrary};
use playsync_sync::{pipeline, SyncOptions, SyncReport};

use crate::logging;

/// Arguments for a sync run.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Flat directory to reconcile (e.g. the root of a USB drive).
    pub target: PathBuf,

    /// Playlists to mirror onto the target.
    #[arg(required = true)]
    pub playlists: Vec<String>,

    /// XML library export to read playlists from.
    #[arg(long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Playlist ordering: `play-order` (library order) or `name`.
    #[arg(long, value_name = "MODE")]
    pub sort: Option<SortMode>,

    /// Settings file (default: <config dir>/playsync/config.yaml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show what would change without touching the target.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Log debug detail.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        logging::init(self.verbose)?;

        let settings = self.load_settings()?;
        let target = TargetDir::new(&self.target)?;

        let library_path = self
            .library
            .or(settings.library)
            .or_else(settings::default_library_path)
            .context("no library export configured; pass --library <PATH>")?;
        let sort_mode = self.sort.or(settings.sort).unwrap_or_default();
        tracing::debug!(
            "library {}, sort mode {sort_mode}",
            library_path.display()
        );

        let library = XmlLibrary::open(library_path)?;
        let names: BTreeSet<String> = self.playlists.into_iter().collect();
        let snapshot = library.fetch(&names)?;

        let options = SyncOptions {
            sort_mode,
            dry_run: self.dry_run,
        };
        let report = pipeline::run(&target, &snapshot, &options)
            .with_context(|| format!("sync of {target} failed"))?;
        log_summary(&report, self.dry_run);
        Ok(())
    }

    fn load_settings(&self) -> Result<Settings> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => match settings::default_path() {
                Ok(path) => path,
                Err(_) => return Ok(Settings::default()),
            },
        };
        settings::load_at(&path).context("failed to load settings")
    }
}

fn log_summary(report: &SyncReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    tracing::debug!(
        "{prefix}{} deleted, {} copied, {} playlist(s) written",
        report.deletions.len(),
        report.copies.len(),
        report.playlists.len()
    );
}
